use crate::cue::CueId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Logical playback state: which cue is loaded, and where paused cues stopped
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
	active: Option<CueId>,
	/// Present only while a cue is paused
	checkpoints: HashMap<CueId, u64>,
}

impl PlaybackState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active(&self) -> Option<&CueId> {
		self.active.as_ref()
	}

	pub fn is_active(&self, cue: &str) -> bool {
		self.active.as_deref() == Some(cue)
	}

	pub fn activate(&mut self, cue: &str) {
		self.active = Some(cue.to_string());
	}

	pub fn clear_active(&mut self) -> Option<CueId> {
		self.active.take()
	}

	pub fn checkpoint(&self, cue: &str) -> Option<u64> {
		self.checkpoints.get(cue).copied()
	}

	pub fn is_paused(&self, cue: &str) -> bool {
		self.checkpoints.contains_key(cue)
	}

	pub fn save_checkpoint(&mut self, cue: &str, offset_ms: u64) {
		self.checkpoints.insert(cue.to_string(), offset_ms);
	}

	/// Removes and returns the checkpoint; each pause is consumed exactly once
	pub fn take_checkpoint(&mut self, cue: &str) -> Option<u64> {
		self.checkpoints.remove(cue)
	}

	/// Drops every checkpoint, returning how many there were
	pub fn clear_checkpoints(&mut self) -> usize {
		let count = self.checkpoints.len();
		self.checkpoints.clear();
		count
	}

	pub fn checkpoints(&self) -> &HashMap<CueId, u64> {
		&self.checkpoints
	}
}

/// Two-stage safety interlock, monotonic within a run
#[derive(Debug, Clone, Default)]
pub struct ApprovalState {
	warned: HashSet<CueId>,
	dangered: HashSet<CueId>,
}

impl ApprovalState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records first-stage approval, returns false if already warned
	pub fn warn(&mut self, cue: &str) -> bool {
		self.warned.insert(cue.to_string())
	}

	/// Records second-stage approval. Refused unless the cue was warned first.
	pub fn danger(&mut self, cue: &str) -> bool {
		if !self.warned.contains(cue) {
			return false;
		}
		self.dangered.insert(cue.to_string());
		true
	}

	pub fn is_warned(&self, cue: &str) -> bool {
		self.warned.contains(cue)
	}

	pub fn is_dangered(&self, cue: &str) -> bool {
		self.dangered.contains(cue)
	}

	pub fn warned(&self) -> &HashSet<CueId> {
		&self.warned
	}

	pub fn dangered(&self) -> &HashSet<CueId> {
		&self.dangered
	}
}

/// Point-in-time view of the orchestrator's local state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSnapshot {
	pub active_cue: Option<CueId>,
	pub paused: BTreeMap<CueId, u64>,
	pub warned: BTreeSet<CueId>,
	pub dangered: BTreeSet<CueId>,
}

impl ShowSnapshot {
	pub fn capture(playback: &PlaybackState, approvals: &ApprovalState) -> Self {
		Self {
			active_cue: playback.active().cloned(),
			paused: playback.checkpoints().iter().map(|(k, v)| (k.clone(), *v)).collect(),
			warned: approvals.warned().iter().cloned().collect(),
			dangered: approvals.dangered().iter().cloned().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn danger_requires_prior_warning() {
		let mut approvals = ApprovalState::new();
		assert!(!approvals.danger("A"));
		assert!(!approvals.is_dangered("A"));

		assert!(approvals.warn("A"));
		assert!(!approvals.warn("A"), "second warning is not a new approval");
		assert!(approvals.danger("A"));
		assert!(approvals.is_dangered("A"));
	}

	#[test]
	fn checkpoint_is_consumed_once() {
		let mut state = PlaybackState::new();
		state.save_checkpoint("A", 4200);
		assert!(state.is_paused("A"));
		assert_eq!(state.take_checkpoint("A"), Some(4200));
		assert_eq!(state.take_checkpoint("A"), None);
		assert!(!state.is_paused("A"));
	}

	#[test]
	fn clearing_drops_every_checkpoint() {
		let mut state = PlaybackState::new();
		state.save_checkpoint("A", 4200);
		state.save_checkpoint("B", 0);

		assert_eq!(state.clear_checkpoints(), 2);
		assert!(state.checkpoints().is_empty());
	}
}
