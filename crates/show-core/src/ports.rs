use crate::error::{PlaybackError, SequenceError};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Intent issued to the pyrotechnic controller, show-time or administrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceOp {
	Start,
	Pause,
	Resume,
	StopAll,
	FirstStage,
	SecondStage,
	Reset,
	Create,
	Fetch,
	List,
	Delete,
}

impl fmt::Display for SequenceOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Start => "start",
			Self::Pause => "pause",
			Self::Resume => "resume",
			Self::StopAll => "stop",
			Self::FirstStage => "first stage approval",
			Self::SecondStage => "second stage approval",
			Self::Reset => "reset",
			Self::Create => "create",
			Self::Fetch => "fetch",
			Self::List => "list",
			Self::Delete => "delete",
		};
		f.write_str(name)
	}
}

/// Successful gateway call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
	/// The remote controller accepted the transition
	Remote { status: u16 },
	/// Silent sequence, no remote call was made
	Silent,
}

/// `Ack | Rejected | Unavailable`, returned by every gateway call
pub type SequenceResult = std::result::Result<Ack, SequenceError>;

/// Client side of the pyrotechnic control API.
///
/// Implementations perform exactly one remote request per call, bounded by a
/// timeout, and never retry. Failures are values, not panics: the
/// orchestrator advances its local state whatever the outcome.
#[async_trait]
pub trait Sequencer: Send + Sync {
	async fn start(&self, sequence: &str) -> SequenceResult;

	async fn pause(&self, sequence: &str) -> SequenceResult;

	async fn resume(&self, sequence: &str) -> SequenceResult;

	/// Stops whichever sequence currently occupies the running stage
	async fn stop_all(&self) -> SequenceResult;

	async fn approve_first_stage(&self, sequence: &str) -> SequenceResult;

	async fn approve_second_stage(&self, sequence: &str) -> SequenceResult;
}

/// Audio backend owned by the orchestrator.
///
/// Offsets are milliseconds from the start of the loaded track.
#[async_trait]
pub trait Playback: Send + Sync {
	/// Load a track, replacing (and stopping) whatever was loaded before
	async fn load(&self, path: &Path) -> Result<(), PlaybackError>;

	async fn play(&self) -> Result<(), PlaybackError>;

	async fn play_from(&self, offset_ms: u64) -> Result<(), PlaybackError>;

	/// Pause and return the offset, `None` if nothing was playing
	async fn pause(&self) -> Option<u64>;

	async fn stop(&self);

	/// Current offset of the loaded track, `None` if nothing is loaded
	async fn position(&self) -> Option<u64>;
}
