//! Services for songid-gw

pub mod normalizer;
pub mod provider_client;

pub use normalizer::normalize;
pub use provider_client::{ProviderClient, ProviderError};
