use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a sequence on the pyrotechnic controller.
///
/// `saved → first_stage → second_stage → running ⇄ paused`, terminal `stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStatus {
	Saved,
	FirstStage,
	SecondStage,
	Running,
	Paused,
	Stopped,
}

impl SequenceStatus {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Saved => "saved",
			Self::FirstStage => "first_stage",
			Self::SecondStage => "second_stage",
			Self::Running => "running",
			Self::Paused => "paused",
			Self::Stopped => "stopped",
		}
	}
}

impl fmt::Display for SequenceStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Sequence resource as served by `/sequences`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
	pub name: String,
	pub status: SequenceStatus,
}

impl Sequence {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			status: SequenceStatus::Saved,
		}
	}
}
