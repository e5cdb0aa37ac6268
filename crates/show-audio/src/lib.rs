//! Audio playback for show cues, backed by rodio

pub mod clock;
pub mod engine;

pub use clock::PlayClock;
pub use engine::{open_track, PlaybackEngine};
