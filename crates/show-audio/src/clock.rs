use std::time::{Duration, Instant};

/// Wall-clock position of the loaded track.
///
/// rodio does not report how far a sink has played, so the offset is derived
/// from when playback (re)started and the offset it started from. Pausing
/// freezes the clock at the paused offset. When the track length is known the
/// position never runs past it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayClock {
	start_instant: Option<Instant>,
	base_ms: u64,
	paused_at: Option<u64>,
	length_ms: Option<u64>,
}

impl PlayClock {
	pub const fn new() -> Self {
		Self {
			start_instant: None,
			base_ms: 0,
			paused_at: None,
			length_ms: None,
		}
	}

	pub fn start(&mut self, offset_ms: u64, now: Instant) {
		self.start_instant = Some(now);
		self.base_ms = offset_ms;
		self.paused_at = None;
	}

	pub fn set_length(&mut self, length: Option<Duration>) {
		self.length_ms = length.map(duration_ms);
	}

	/// Freeze the clock, returning the offset it froze at
	pub fn pause(&mut self, now: Instant) -> u64 {
		let offset = self.position_at(now);
		self.paused_at = Some(offset);
		offset
	}

	pub const fn is_paused(&self) -> bool {
		self.paused_at.is_some()
	}

	pub const fn is_running(&self) -> bool {
		self.start_instant.is_some() && self.paused_at.is_none()
	}

	pub fn position_at(&self, now: Instant) -> u64 {
		if let Some(paused) = self.paused_at {
			return paused;
		}
		let position = match self.start_instant {
			Some(start) => self.base_ms.saturating_add(duration_ms(now.saturating_duration_since(start))),
			None => self.base_ms,
		};
		self.length_ms.map_or(position, |length| position.min(length))
	}

	pub fn reset(&mut self) {
		*self = Self::new();
	}
}

fn duration_ms(duration: Duration) -> u64 {
	u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn position_advances_from_base_offset() {
		let t0 = Instant::now();
		let mut clock = PlayClock::new();
		clock.start(4200, t0);

		assert_eq!(clock.position_at(t0), 4200);
		assert_eq!(clock.position_at(t0 + Duration::from_millis(750)), 4950);
	}

	#[test]
	fn pause_freezes_position() {
		let t0 = Instant::now();
		let mut clock = PlayClock::new();
		clock.start(0, t0);

		assert_eq!(clock.pause(t0 + Duration::from_millis(1500)), 1500);
		assert!(clock.is_paused());
		assert_eq!(clock.position_at(t0 + Duration::from_secs(60)), 1500);
	}

	#[test]
	fn restart_clears_pause() {
		let t0 = Instant::now();
		let mut clock = PlayClock::new();
		clock.start(0, t0);
		let offset = clock.pause(t0 + Duration::from_millis(300));

		let t1 = t0 + Duration::from_secs(10);
		clock.start(offset, t1);

		assert!(clock.is_running());
		assert_eq!(clock.position_at(t1 + Duration::from_millis(200)), 500);
	}

	#[test]
	fn position_stops_at_track_end() {
		let t0 = Instant::now();
		let mut clock = PlayClock::new();
		clock.start(0, t0);
		clock.set_length(Some(Duration::from_secs(3)));

		assert_eq!(clock.position_at(t0 + Duration::from_secs(2)), 2000);
		assert_eq!(clock.pause(t0 + Duration::from_secs(10)), 3000);
	}

	#[test]
	fn reset_returns_to_zero() {
		let t0 = Instant::now();
		let mut clock = PlayClock::new();
		clock.start(900, t0);
		clock.reset();

		assert!(!clock.is_running());
		assert_eq!(clock.position_at(t0 + Duration::from_secs(1)), 0);
	}
}
