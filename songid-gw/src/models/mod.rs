//! Data models for songid-gw

pub mod identify_outcome;
pub mod audio_sample;

pub use audio_sample::AudioSample;
pub use identify_outcome::{IdentifyOutcome, SongResult};
