use crate::cue::CueId;
use crate::error::EventMapError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Sequence name meaning "no firework for this cue"
pub const SILENT_SEQUENCE: &str = "countdown";

pub fn is_silent_sequence(name: &str) -> bool {
	name == SILENT_SEQUENCE
}

/// What a cue resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueMapping {
	/// Track name without extension, `None` for a silent cue
	#[serde(default)]
	pub track: Option<String>,
	/// Pyrotechnic sequence name, or [`SILENT_SEQUENCE`]
	pub sequence: String,
}

impl CueMapping {
	pub fn new(track: impl Into<String>, sequence: impl Into<String>) -> Self {
		Self {
			track: Some(track.into()),
			sequence: sequence.into(),
		}
	}

	pub fn silent(sequence: impl Into<String>) -> Self {
		Self {
			track: None,
			sequence: sequence.into(),
		}
	}

	/// True when the cue has no audio
	pub const fn is_silent(&self) -> bool {
		self.track.is_none()
	}

	/// True when the cue drives a real pyrotechnic sequence
	pub fn fires(&self) -> bool {
		!is_silent_sequence(&self.sequence)
	}
}

/// Static cue → (track, sequence) mapping, read-only for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventMap {
	cues: BTreeMap<CueId, CueMapping>,
}

impl EventMap {
	pub fn new(cues: impl IntoIterator<Item = (CueId, CueMapping)>) -> Self {
		Self { cues: cues.into_iter().collect() }
	}

	/// Mapping shipped with the controller, used when no file exists
	pub fn builtin() -> Self {
		Self::new([
			("fd2c87".to_string(), CueMapping::silent(SILENT_SEQUENCE)),
			("085ba2".to_string(), CueMapping::new("Audio1", "sequence1")),
			("5d9e5a".to_string(), CueMapping::new("Audio2", "sequence2")),
			("499c46".to_string(), CueMapping::new("Audio3", "sequence3")),
			("5851a5".to_string(), CueMapping::new("Audio4", "sequence4")),
		])
	}

	pub fn load(path: &Path) -> Result<Self, EventMapError> {
		let content = fs::read_to_string(path)?;
		Ok(serde_json::from_str(&content)?)
	}

	pub fn save(&self, path: &Path) -> Result<(), EventMapError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		fs::write(path, serde_json::to_string_pretty(self)?)?;
		Ok(())
	}

	/// Loads the mapping file, falling back to [`EventMap::builtin`].
	///
	/// A missing file is created with the builtin mapping. An unreadable file
	/// is left untouched so the operator can fix it.
	pub fn load_or_create(path: &Path) -> Self {
		if !path.exists() {
			warn!("⚠️ Event mapping {} not found, creating default mapping", path.display());
			let mapping = Self::builtin();
			match mapping.save(path) {
				Ok(()) => info!("📝 Default event mapping written to {}", path.display()),
				Err(e) => error!("❌ Failed to write default event mapping: {}", e),
			}
			return mapping;
		}

		match Self::load(path) {
			Ok(mapping) => {
				info!("📋 Event mapping loaded from {} ({} cues)", path.display(), mapping.len());
				mapping
			}
			Err(e) => {
				error!("❌ Failed to load event mapping {}: {}, using defaults", path.display(), e);
				Self::builtin()
			}
		}
	}

	pub fn resolve(&self, cue: &str) -> Option<&CueMapping> {
		self.cues.get(cue)
	}

	/// Every sequence the remote controller must know about
	pub fn firing_sequences(&self) -> BTreeSet<&str> {
		self.cues.values().filter(|m| m.fires()).map(|m| m.sequence.as_str()).collect()
	}

	pub fn tracks(&self) -> BTreeSet<&str> {
		self.cues.values().filter_map(|m| m.track.as_deref()).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&CueId, &CueMapping)> {
		self.cues.iter()
	}

	pub fn len(&self) -> usize {
		self.cues.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cues.is_empty()
	}
}
