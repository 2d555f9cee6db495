//! HTTP API handlers for songid-gw

pub mod health;
pub mod identify;

pub use health::health_routes;
pub use identify::identify_routes;
