use crate::cue::CueId;
use crate::ports::SequenceOp;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShowError>;

/// Errors raised locally by the orchestrator and its controller
#[derive(Error, Debug)]
pub enum ShowError {
	#[error("Unknown cue: {0}")]
	UnknownCue(CueId),

	#[error("Playback error: {0}")]
	Playback(#[from] PlaybackError),

	#[error("Show controller closed")]
	Closed,
}

/// Failures of the audio backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
	#[error("Track not found: {}", .0.display())]
	TrackNotFound(PathBuf),

	#[error("Failed to decode {}: {reason}", .path.display())]
	Decode { path: PathBuf, reason: String },

	#[error("No track loaded")]
	NothingLoaded,

	#[error("Audio device error: {0}")]
	Device(String),
}

/// Failure classification of a pyrotechnic gateway call.
///
/// `Rejected` is a policy refusal by the remote state machine (4xx) and is
/// expected during a show. `Unavailable` means the controller could not be
/// reached or failed internally (5xx, refused connection, timeout).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
	#[error("{op} rejected for '{sequence}' (status {status})")]
	Rejected { op: SequenceOp, sequence: String, status: u16 },

	#[error("Pyrotechnic controller unavailable during {op} of '{sequence}': {reason}")]
	Unavailable { op: SequenceOp, sequence: String, reason: String },
}

impl SequenceError {
	pub const fn is_unavailable(&self) -> bool {
		matches!(self, Self::Unavailable { .. })
	}
}

/// Errors reading or writing the persisted cue mapping
#[derive(Error, Debug)]
pub enum EventMapError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON parsing error: {0}")]
	JsonParse(#[from] serde_json::Error),
}
