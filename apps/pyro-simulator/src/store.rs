use crate::error::StoreError;
use pyro_gateway::{Sequence, SequenceStatus};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, StoreError>;

/// Which sequence occupies each approval/run stage; at most one per stage
#[derive(Debug, Clone, Default)]
struct StageSlots {
	first_stage: Option<String>,
	second_stage: Option<String>,
	running: Option<String>,
}

impl StageSlots {
	fn slot(&mut self, stage: SequenceStatus) -> Option<&mut Option<String>> {
		match stage {
			SequenceStatus::FirstStage => Some(&mut self.first_stage),
			SequenceStatus::SecondStage => Some(&mut self.second_stage),
			SequenceStatus::Running => Some(&mut self.running),
			_ => None,
		}
	}

	fn release(&mut self, name: &str) {
		for slot in [&mut self.first_stage, &mut self.second_stage, &mut self.running] {
			if slot.as_deref() == Some(name) {
				*slot = None;
			}
		}
	}

	fn clear(&mut self) {
		*self = Self::default();
	}
}

/// In-memory pyrotechnic controller.
///
/// A sequence climbs `saved → first_stage → second_stage → running`, one
/// step at a time, and each stage holds a single sequence. A running sequence
/// can be paused and resumed; `stop` ends whatever holds the running stage.
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
	sequences: BTreeMap<String, Sequence>,
	stages: StageSlots,
}

impl SequenceStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn list(&self) -> Vec<Sequence> {
		self.sequences.values().cloned().collect()
	}

	pub fn get(&self, name: &str) -> Result<Sequence> {
		self.sequences.get(name).cloned().ok_or_else(|| StoreError::NotFound(name.to_string()))
	}

	pub fn create(&mut self, name: &str) -> Result<Sequence> {
		if self.sequences.contains_key(name) {
			return Err(StoreError::AlreadyExists(name.to_string()));
		}
		let sequence = Sequence::new(name);
		self.sequences.insert(name.to_string(), sequence.clone());
		Ok(sequence)
	}

	pub fn delete(&mut self, name: &str) -> Result<Sequence> {
		let sequence = self.sequences.remove(name).ok_or_else(|| StoreError::NotFound(name.to_string()))?;
		self.stages.release(name);
		Ok(sequence)
	}

	pub fn reset(&mut self) {
		self.sequences.clear();
		self.stages.clear();
	}

	/// Advance one step up the stage ladder
	pub fn advance(&mut self, name: &str, to: SequenceStatus) -> Result<Sequence> {
		let from = self.get(name)?.status;
		let required = match to {
			SequenceStatus::FirstStage => SequenceStatus::Saved,
			SequenceStatus::SecondStage => SequenceStatus::FirstStage,
			SequenceStatus::Running => SequenceStatus::SecondStage,
			_ => return Err(StoreError::Forbidden { name: name.to_string(), from, to }),
		};
		if from != required {
			return Err(StoreError::Forbidden { name: name.to_string(), from, to });
		}

		if let Some(holder) = self.stages.slot(to).and_then(|slot| slot.clone()) {
			return Err(StoreError::StageOccupied { stage: to, holder });
		}

		if let Some(slot) = self.stages.slot(from) {
			*slot = None;
		}
		if let Some(slot) = self.stages.slot(to) {
			*slot = Some(name.to_string());
		}
		Ok(self.set_status(name, to))
	}

	pub fn pause(&mut self, name: &str) -> Result<Sequence> {
		let from = self.get(name)?.status;
		match from {
			SequenceStatus::Running | SequenceStatus::Paused => Ok(self.set_status(name, SequenceStatus::Paused)),
			_ => Err(StoreError::Forbidden {
				name: name.to_string(),
				from,
				to: SequenceStatus::Paused,
			}),
		}
	}

	pub fn resume(&mut self, name: &str) -> Result<Sequence> {
		let from = self.get(name)?.status;
		match from {
			SequenceStatus::Paused => Ok(self.set_status(name, SequenceStatus::Running)),
			_ => Err(StoreError::Forbidden {
				name: name.to_string(),
				from,
				to: SequenceStatus::Running,
			}),
		}
	}

	/// Stop the sequence holding the running stage, if any
	pub fn stop(&mut self) -> Option<Sequence> {
		let name = self.stages.running.take()?;
		Some(self.set_status(&name, SequenceStatus::Stopped))
	}

	fn set_status(&mut self, name: &str, status: SequenceStatus) -> Sequence {
		let sequence = self.sequences.entry(name.to_string()).or_insert_with(|| Sequence::new(name));
		sequence.status = status;
		sequence.clone()
	}
}
