use crate::client::SequenceGateway;
use crate::error::BootstrapError;
use show_core::{is_silent_sequence, SequenceError};
use tracing::{info, warn};

impl SequenceGateway {
	/// Bring the controller to a known state before the show.
	///
	/// Resets everything, then creates each firing sequence. A refused create
	/// (e.g. the name already exists) is a warning; an unreachable controller
	/// aborts. Returns how many sequences were created.
	pub async fn bootstrap<'a>(&self, sequences: impl IntoIterator<Item = &'a str>) -> Result<usize, BootstrapError> {
		match self.reset().await {
			Ok(_) => info!("♻️ Pyrotechnic controller reset"),
			Err(e @ SequenceError::Rejected { .. }) => warn!("⚠️ Reset refused, continuing: {}", e),
			Err(e) => return Err(BootstrapError::Reset(e)),
		}

		let mut created = 0;
		for name in sequences {
			if is_silent_sequence(name) {
				continue;
			}

			match self.create(name).await {
				Ok(sequence) => {
					info!("🧨 Sequence '{}' created ({})", sequence.name, sequence.status);
					created += 1;
				}
				Err(e @ SequenceError::Rejected { .. }) => warn!("⚠️ Sequence '{}' not created: {}", name, e),
				Err(e) => return Err(BootstrapError::Create(e)),
			}
		}

		info!("✅ Pyrotechnic controller ready with {} sequences", created);
		Ok(created)
	}
}
