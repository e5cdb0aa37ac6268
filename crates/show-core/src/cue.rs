use std::fmt;

/// Opaque cue identifier as sent by the timer service
pub type CueId = String;

/// A decoded cue from any cue source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueEvent {
	Start { cue: CueId },
	Pause,
	Resume,
	Stop,
	Warning { cue: CueId },
	Danger { cue: CueId },
	/// Anything the transport could decode but does not map to a cue
	Unrecognized { address: String, args: Vec<String> },
}

impl CueEvent {
	pub fn start(cue: impl Into<CueId>) -> Self {
		Self::Start { cue: cue.into() }
	}

	pub fn warning(cue: impl Into<CueId>) -> Self {
		Self::Warning { cue: cue.into() }
	}

	pub fn danger(cue: impl Into<CueId>) -> Self {
		Self::Danger { cue: cue.into() }
	}

	/// Wire address this event corresponds to
	pub fn address(&self) -> &str {
		match self {
			Self::Start { .. } => "/start",
			Self::Pause => "/pause",
			Self::Resume => "/resume",
			Self::Stop => "/stop",
			Self::Warning { .. } => "/warning",
			Self::Danger { .. } => "/danger",
			Self::Unrecognized { address, .. } => address,
		}
	}

	/// Cue the event refers to, if it carries one
	pub fn cue(&self) -> Option<&str> {
		match self {
			Self::Start { cue } | Self::Warning { cue } | Self::Danger { cue } => Some(cue),
			_ => None,
		}
	}
}

impl fmt::Display for CueEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unrecognized { address, args } => write!(f, "{address} {args:?}"),
			other => match other.cue() {
				Some(cue) => write!(f, "{} [{cue}]", other.address()),
				None => write!(f, "{}", other.address()),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_includes_cue_argument() {
		assert_eq!(CueEvent::start("085ba2").to_string(), "/start [085ba2]");
		assert_eq!(CueEvent::Pause.to_string(), "/pause");
		assert_eq!(
			CueEvent::Unrecognized {
				address: "/ontime/clock".into(),
				args: vec!["12".into()],
			}
			.to_string(),
			"/ontime/clock [\"12\"]"
		);
	}

	#[test]
	fn cue_is_only_present_on_targeted_events() {
		assert_eq!(CueEvent::danger("a").cue(), Some("a"));
		assert_eq!(CueEvent::Stop.cue(), None);
	}
}
