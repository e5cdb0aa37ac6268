use crate::error::Result;
use reqwest::Client;
use serde::Deserialize;
use show_core::{CueEvent, CueId, ShowHandle};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPlayback {
	#[default]
	Stop,
	Play,
	Pause,
	Armed,
	Roll,
	#[serde(other)]
	Unknown,
}

impl TimerPlayback {
	const fn is_playing(self) -> bool {
		matches!(self, Self::Play | Self::Roll)
	}

	const fn is_stopped(self) -> bool {
		matches!(self, Self::Stop | Self::Armed)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
	#[default]
	None,
	Default,
	Warning,
	Danger,
	Overtime,
	Pending,
	#[serde(other)]
	Unknown,
}

/// What the watcher remembers between polls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSnapshot {
	pub playback: TimerPlayback,
	pub phase: TimerPhase,
	pub event_id: Option<CueId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PollBody {
	Wrapped { payload: PollPayload },
	Bare(PollPayload),
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PollPayload {
	#[serde(default)]
	timer: TimerData,
	#[serde(default)]
	event_now: Option<EventRef>,
}

#[derive(Deserialize, Default)]
struct TimerData {
	#[serde(default)]
	playback: TimerPlayback,
	#[serde(default)]
	phase: TimerPhase,
}

#[derive(Deserialize)]
struct EventRef {
	id: CueId,
}

/// Parse the timer service status body, with or without a `payload` envelope
pub fn parse_poll(body: &str) -> std::result::Result<TimerSnapshot, serde_json::Error> {
	let payload = match serde_json::from_str::<PollBody>(body)? {
		PollBody::Wrapped { payload } | PollBody::Bare(payload) => payload,
	};

	Ok(TimerSnapshot {
		playback: payload.timer.playback,
		phase: payload.timer.phase,
		event_id: payload.event_now.map(|e| e.id),
	})
}

/// Cue events implied by the change from `prev` to `next`
pub fn diff_snapshots(prev: &TimerSnapshot, next: &TimerSnapshot) -> Vec<CueEvent> {
	let mut events = Vec::new();
	let same_event = prev.event_id == next.event_id;

	if next.playback.is_playing() {
		match (&next.event_id, prev.playback) {
			(Some(id), _) if !same_event => events.push(CueEvent::start(id.clone())),
			(Some(_), TimerPlayback::Pause) => events.push(CueEvent::Resume),
			(Some(id), previous) if !previous.is_playing() => events.push(CueEvent::start(id.clone())),
			_ => {}
		}
	} else if next.playback == TimerPlayback::Pause && prev.playback.is_playing() && same_event {
		events.push(CueEvent::Pause);
	} else if next.playback.is_stopped() && (prev.playback.is_playing() || prev.playback == TimerPlayback::Pause) {
		events.push(CueEvent::Stop);
	}

	if let Some(id) = &next.event_id {
		let entered = |phase: TimerPhase| next.phase == phase && (prev.phase != phase || !same_event);
		if entered(TimerPhase::Warning) {
			events.push(CueEvent::warning(id.clone()));
		}
		if entered(TimerPhase::Danger) {
			events.push(CueEvent::danger(id.clone()));
		}
	}

	events
}

/// Derives cues by polling the timer service
pub struct PollWatcher {
	client: Client,
	url: String,
	period: Duration,
}

impl PollWatcher {
	pub fn new(url: impl Into<String>, period: Duration, timeout: Duration) -> Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self {
			client,
			url: url.into(),
			period,
		})
	}

	pub async fn poll(&self) -> Result<TimerSnapshot> {
		let body = self.client.get(&self.url).send().await?.error_for_status()?.text().await?;
		Ok(parse_poll(&body)?)
	}

	pub async fn run(self, handle: ShowHandle, cancel: CancellationToken) {
		info!("🔁 Polling {} every {:?}", self.url, self.period);

		let mut ticker = interval(self.period);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
		let mut last = TimerSnapshot::default();

		loop {
			tokio::select! {
				() = cancel.cancelled() => {
					info!("🛑 Poll watcher shutting down");
					break;
				}
				_ = ticker.tick() => match self.poll().await {
					Ok(next) => {
						for event in diff_snapshots(&last, &next) {
							debug!("📨 Cue derived from poll: {}", event);
							if handle.dispatch(event).is_err() {
								warn!("⚠️ Show controller closed, stopping poll watcher");
								return;
							}
						}
						last = next;
					}
					Err(e) => warn!("⚠️ Poll of {} failed: {}", self.url, e),
				}
			}
		}

		info!("✅ Poll watcher stopped");
	}
}
