#![allow(dead_code)]

use async_trait::async_trait;
use show_core::{is_silent_sequence, Ack, EventMap, Playback, PlaybackError, SequenceError, SequenceOp, SequenceResult, Sequencer, ShowOrchestrator, TrackLibrary};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const AUDIO_DIR: &str = "/show/audio";

/// Every collaborator call, in the order the orchestrator made them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Sequence(SequenceOp, String),
	Load(PathBuf),
	Play,
	PlayFrom(u64),
	Pause,
	Stop,
	Position,
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
	pub fn push(&self, call: Call) {
		self.0.lock().unwrap().push(call);
	}

	pub fn calls(&self) -> Vec<Call> {
		self.0.lock().unwrap().clone()
	}

	pub fn take(&self) -> Vec<Call> {
		std::mem::take(&mut *self.0.lock().unwrap())
	}

	pub fn sequence_calls(&self) -> Vec<(SequenceOp, String)> {
		self
			.calls()
			.into_iter()
			.filter_map(|c| match c {
				Call::Sequence(op, name) => Some((op, name)),
				_ => None,
			})
			.collect()
	}

	pub fn playback_calls(&self) -> Vec<Call> {
		self.calls().into_iter().filter(|c| !matches!(c, Call::Sequence(..))).collect()
	}

	pub fn position_of(&self, call: &Call) -> Option<usize> {
		self.calls().iter().position(|c| c == call)
	}
}

pub fn track(name: &str) -> PathBuf {
	Path::new(AUDIO_DIR).join(format!("{name}.mp3"))
}

// ============================================================================
// Playback fake
// ============================================================================

pub struct FakePlayback {
	journal: Journal,
	position: Mutex<Option<u64>>,
	missing: Mutex<HashSet<PathBuf>>,
}

impl FakePlayback {
	pub fn new(journal: Journal) -> Self {
		Self {
			journal,
			position: Mutex::new(None),
			missing: Mutex::new(HashSet::new()),
		}
	}

	pub fn set_position(&self, offset_ms: u64) {
		*self.position.lock().unwrap() = Some(offset_ms);
	}

	pub fn mark_missing(&self, path: PathBuf) {
		self.missing.lock().unwrap().insert(path);
	}
}

#[async_trait]
impl Playback for FakePlayback {
	async fn load(&self, path: &Path) -> Result<(), PlaybackError> {
		self.journal.push(Call::Load(path.to_path_buf()));
		if self.missing.lock().unwrap().contains(path) {
			return Err(PlaybackError::TrackNotFound(path.to_path_buf()));
		}
		Ok(())
	}

	async fn play(&self) -> Result<(), PlaybackError> {
		self.journal.push(Call::Play);
		Ok(())
	}

	async fn play_from(&self, offset_ms: u64) -> Result<(), PlaybackError> {
		self.journal.push(Call::PlayFrom(offset_ms));
		Ok(())
	}

	async fn pause(&self) -> Option<u64> {
		self.journal.push(Call::Pause);
		*self.position.lock().unwrap()
	}

	async fn stop(&self) {
		self.journal.push(Call::Stop);
	}

	async fn position(&self) -> Option<u64> {
		self.journal.push(Call::Position);
		*self.position.lock().unwrap()
	}
}

// ============================================================================
// Sequencer fake
// ============================================================================

pub struct FakeSequencer {
	journal: Journal,
	failures: Mutex<HashMap<SequenceOp, SequenceError>>,
	latency: Option<Duration>,
	in_flight: AtomicUsize,
	max_in_flight: AtomicUsize,
}

impl FakeSequencer {
	pub fn new(journal: Journal) -> Self {
		Self {
			journal,
			failures: Mutex::new(HashMap::new()),
			latency: None,
			in_flight: AtomicUsize::new(0),
			max_in_flight: AtomicUsize::new(0),
		}
	}

	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = Some(latency);
		self
	}

	pub fn fail_unavailable(&self, op: SequenceOp) {
		let error = SequenceError::Unavailable {
			op,
			sequence: "any".into(),
			reason: "HTTP 503".into(),
		};
		self.failures.lock().unwrap().insert(op, error);
	}

	pub fn fail_rejected(&self, op: SequenceOp) {
		let error = SequenceError::Rejected {
			op,
			sequence: "any".into(),
			status: 403,
		};
		self.failures.lock().unwrap().insert(op, error);
	}

	pub fn max_in_flight(&self) -> usize {
		self.max_in_flight.load(Ordering::SeqCst)
	}

	async fn call(&self, op: SequenceOp, sequence: &str) -> SequenceResult {
		let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.max_in_flight.fetch_max(now, Ordering::SeqCst);

		self.journal.push(Call::Sequence(op, sequence.to_string()));
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}

		self.in_flight.fetch_sub(1, Ordering::SeqCst);

		if is_silent_sequence(sequence) {
			return Ok(Ack::Silent);
		}
		match self.failures.lock().unwrap().get(&op) {
			Some(error) => Err(error.clone()),
			None => Ok(Ack::Remote { status: 200 }),
		}
	}
}

#[async_trait]
impl Sequencer for FakeSequencer {
	async fn start(&self, sequence: &str) -> SequenceResult {
		self.call(SequenceOp::Start, sequence).await
	}

	async fn pause(&self, sequence: &str) -> SequenceResult {
		self.call(SequenceOp::Pause, sequence).await
	}

	async fn resume(&self, sequence: &str) -> SequenceResult {
		self.call(SequenceOp::Resume, sequence).await
	}

	async fn stop_all(&self) -> SequenceResult {
		self.call(SequenceOp::StopAll, "*").await
	}

	async fn approve_first_stage(&self, sequence: &str) -> SequenceResult {
		self.call(SequenceOp::FirstStage, sequence).await
	}

	async fn approve_second_stage(&self, sequence: &str) -> SequenceResult {
		self.call(SequenceOp::SecondStage, sequence).await
	}
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
	pub orchestrator: ShowOrchestrator,
	pub journal: Journal,
	pub playback: Arc<FakePlayback>,
	pub sequencer: Arc<FakeSequencer>,
}

pub fn harness(event_map: EventMap) -> Harness {
	harness_with(event_map, |journal| FakeSequencer::new(journal))
}

pub fn harness_with(event_map: EventMap, sequencer: impl FnOnce(Journal) -> FakeSequencer) -> Harness {
	let journal = Journal::default();
	let playback = Arc::new(FakePlayback::new(journal.clone()));
	let sequencer = Arc::new(sequencer(journal.clone()));
	let orchestrator = ShowOrchestrator::new(event_map, TrackLibrary::new(AUDIO_DIR), playback.clone(), sequencer.clone());

	Harness {
		orchestrator,
		journal,
		playback,
		sequencer,
	}
}
