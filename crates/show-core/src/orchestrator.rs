use crate::cue::CueEvent;
use crate::error::{PlaybackError, Result, ShowError};
use crate::event_map::{CueMapping, EventMap};
use crate::library::TrackLibrary;
use crate::ports::{Playback, SequenceOp, SequenceResult, Sequencer};
use crate::state::{ApprovalState, PlaybackState, ShowSnapshot};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Show-event state machine.
///
/// Local state is advanced optimistically: a failed gateway call is logged
/// (and alerted by the gateway when the controller is unreachable), but it
/// never prevents the orchestrator from moving on. Two orderings hold for
/// every transition:
///
/// - stop-before-start: the previous cue is stopped before a new one starts
/// - capture-before-pause: the playback offset is read before audio pauses
pub struct ShowOrchestrator {
	event_map: EventMap,
	library: TrackLibrary,
	playback: Arc<dyn Playback>,
	sequencer: Arc<dyn Sequencer>,
	playback_state: PlaybackState,
	approvals: ApprovalState,
}

impl ShowOrchestrator {
	pub fn new(event_map: EventMap, library: TrackLibrary, playback: Arc<dyn Playback>, sequencer: Arc<dyn Sequencer>) -> Self {
		Self {
			event_map,
			library,
			playback,
			sequencer,
			playback_state: PlaybackState::new(),
			approvals: ApprovalState::new(),
		}
	}

	pub const fn event_map(&self) -> &EventMap {
		&self.event_map
	}

	pub const fn playback_state(&self) -> &PlaybackState {
		&self.playback_state
	}

	pub const fn approvals(&self) -> &ApprovalState {
		&self.approvals
	}

	pub fn snapshot(&self) -> ShowSnapshot {
		ShowSnapshot::capture(&self.playback_state, &self.approvals)
	}

	/// Dispatch one cue. Local failures are logged here and never propagate.
	pub async fn handle(&mut self, event: CueEvent) {
		debug!("🎯 Handling cue {}", event);

		let result = match event {
			CueEvent::Start { cue } => self.on_start(&cue).await,
			CueEvent::Pause => self.on_pause().await,
			CueEvent::Resume => self.on_resume().await,
			CueEvent::Stop => {
				self.on_stop().await;
				Ok(())
			}
			CueEvent::Warning { cue } => self.on_warning(&cue).await,
			CueEvent::Danger { cue } => {
				self.on_danger(&cue).await;
				Ok(())
			}
			CueEvent::Unrecognized { address, args } => {
				self.on_unrecognized(&address, &args);
				Ok(())
			}
		};

		match result {
			Ok(()) => {}
			Err(ShowError::UnknownCue(cue)) => error!("❌ Unknown cue id: {}", cue),
			Err(e) => error!("❌ Cue handling failed: {}", e),
		}
	}

	/// Start (or continue) a cue.
	///
	/// A paused cue resumes from its checkpoint and the gateway is asked to
	/// resume; otherwise the track plays from the top and the sequence starts.
	pub async fn on_start(&mut self, cue: &str) -> Result<()> {
		let mapping = self.resolve(cue)?;

		if let Some(previous) = self.playback_state.active().filter(|active| active.as_str() != cue).cloned() {
			self.stop_previous(&previous).await;
		}

		let checkpoint = self.playback_state.checkpoint(cue);

		let Some(track) = mapping.track.as_deref() else {
			info!("⏱️ Cue {} started (silent, sequence '{}')", cue, mapping.sequence);
			self.playback_state.take_checkpoint(cue);
			self.playback_state.activate(cue);
			self.fire(&mapping.sequence, checkpoint.is_some()).await;
			return Ok(());
		};

		match self.start_audio(track, checkpoint).await {
			Ok(()) => {
				self.playback_state.take_checkpoint(cue);
				self.playback_state.activate(cue);
				match checkpoint {
					Some(offset) => info!("▶️ Cue {} resumed '{}' at {}ms", cue, track, offset),
					None => info!("▶️ Cue {} started '{}'", cue, track),
				}
				self.fire(&mapping.sequence, checkpoint.is_some()).await;
				Ok(())
			}
			Err(e) => {
				// Only the audio half is aborted. The checkpoint is spent on the
				// resume issued below, and the cue is left inactive.
				self.playback_state.take_checkpoint(cue);
				if self.playback_state.is_active(cue) {
					self.playback_state.clear_active();
				}
				self.fire(&mapping.sequence, checkpoint.is_some()).await;
				Err(e.into())
			}
		}
	}

	/// Pause the active cue, keeping a checkpoint so it can resume in place
	pub async fn on_pause(&mut self) -> Result<()> {
		let Some(cue) = self.playback_state.active().cloned() else {
			info!("⏸️ Pause ignored: no active cue");
			return Ok(());
		};

		if self.playback_state.is_paused(&cue) {
			info!("⏸️ Cue {} is already paused", cue);
			return Ok(());
		}

		let mapping = self.resolve(&cue)?;

		// Silent cues checkpoint at 0 so the next start resumes the sequence
		let offset = if mapping.is_silent() { 0 } else { self.playback.position().await.unwrap_or(0) };
		self.playback_state.save_checkpoint(&cue, offset);

		if !mapping.is_silent() {
			self.playback.pause().await;
		}
		info!("⏸️ Cue {} paused at {}ms", cue, offset);

		let outcome = self.sequencer.pause(&mapping.sequence).await;
		Self::note(SequenceOp::Pause, &mapping.sequence, &outcome);
		Ok(())
	}

	/// Resume the active cue through the same path as [`Self::on_start`]
	pub async fn on_resume(&mut self) -> Result<()> {
		let Some(cue) = self.playback_state.active().cloned() else {
			info!("▶️ Resume ignored: no active cue");
			return Ok(());
		};

		if !self.playback_state.is_paused(&cue) {
			info!("▶️ Resume ignored: cue {} is not paused", cue);
			return Ok(());
		}

		self.on_start(&cue).await
	}

	/// Stop everything. Always succeeds locally.
	pub async fn on_stop(&mut self) {
		self.playback.stop().await;

		let outcome = self.sequencer.stop_all().await;
		Self::note(SequenceOp::StopAll, "*", &outcome);

		let dropped = self.playback_state.clear_checkpoints();
		match self.playback_state.clear_active() {
			Some(cue) => info!("⏹️ Cue {} stopped", cue),
			None => info!("⏹️ Stop received with no active cue"),
		}
		if dropped > 0 {
			debug!("Dropped {} pause checkpoints", dropped);
		}
	}

	/// First-stage approval for a cue's sequence
	pub async fn on_warning(&mut self, cue: &str) -> Result<()> {
		let mapping = self.resolve(cue)?;

		if !mapping.fires() {
			debug!("Warning for cue {} ignored: no firework", cue);
			return Ok(());
		}

		self.approvals.warn(cue);
		info!("⚠️ Warning for cue {}: first stage approval of '{}'", cue, mapping.sequence);

		let outcome = self.sequencer.approve_first_stage(&mapping.sequence).await;
		Self::note(SequenceOp::FirstStage, &mapping.sequence, &outcome);
		Ok(())
	}

	/// Second-stage approval, only for cues that went through a warning
	pub async fn on_danger(&mut self, cue: &str) {
		if !self.approvals.is_warned(cue) {
			debug!("Danger for cue {} ignored: no prior warning", cue);
			return;
		}

		let Some(mapping) = self.event_map.resolve(cue).cloned() else {
			return;
		};
		if !mapping.fires() {
			return;
		}

		self.approvals.danger(cue);
		info!("🔥 Danger for cue {}: second stage approval of '{}'", cue, mapping.sequence);

		let outcome = self.sequencer.approve_second_stage(&mapping.sequence).await;
		Self::note(SequenceOp::SecondStage, &mapping.sequence, &outcome);
	}

	pub fn on_unrecognized(&self, address: &str, args: &[String]) {
		debug!("📨 Unhandled message {} with args {:?}", address, args);
	}

	fn resolve(&self, cue: &str) -> Result<CueMapping> {
		self.event_map.resolve(cue).cloned().ok_or_else(|| ShowError::UnknownCue(cue.to_string()))
	}

	/// Best-effort cleanup before switching cues: sequence first, then audio
	async fn stop_previous(&mut self, previous: &str) {
		info!("🔀 Stopping cue {} before switching", previous);
		self.playback_state.take_checkpoint(previous);

		let outcome = self.sequencer.stop_all().await;
		Self::note(SequenceOp::StopAll, "*", &outcome);

		if self.event_map.resolve(previous).is_some_and(|m| !m.is_silent()) {
			self.playback.stop().await;
		}

		self.playback_state.clear_active();
	}

	async fn start_audio(&self, track: &str, checkpoint: Option<u64>) -> std::result::Result<(), PlaybackError> {
		let path = self.library.path_for(track);
		self.playback.load(&path).await?;

		match checkpoint {
			Some(offset) => self.playback.play_from(offset).await,
			None => self.playback.play().await,
		}
	}

	async fn fire(&self, sequence: &str, resume: bool) {
		let (op, outcome) = if resume {
			(SequenceOp::Resume, self.sequencer.resume(sequence).await)
		} else {
			(SequenceOp::Start, self.sequencer.start(sequence).await)
		};
		Self::note(op, sequence, &outcome);
	}

	fn note(op: SequenceOp, sequence: &str, outcome: &SequenceResult) {
		match outcome {
			Ok(ack) => debug!("✅ {} of '{}' acknowledged: {:?}", op, sequence, ack),
			Err(e) => warn!("⚠️ {} of '{}' failed, continuing with local state: {}", op, sequence, e),
		}
	}
}
