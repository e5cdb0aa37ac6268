use crate::config::{Config, CueSourceKind};
use crate::error::Result;
use crate::poll::PollWatcher;
use osc_cues::PushListener;
use show_core::ShowHandle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Producer of cue events, one per run
pub enum CueSource {
	PushListener(PushListener),
	PollWatcher(PollWatcher),
}

impl CueSource {
	pub async fn from_config(config: &Config) -> Result<Self> {
		let source = match config.cue_source {
			CueSourceKind::Push => Self::PushListener(PushListener::bind(config.osc_listen_addr).await?),
			CueSourceKind::Poll => Self::PollWatcher(PollWatcher::new(&config.poll_url, config.poll_interval(), config.gateway().timeout)?),
		};
		Ok(source)
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::PushListener(_) => "osc push listener",
			Self::PollWatcher(_) => "poll watcher",
		}
	}

	/// Run on its own task until cancelled
	pub fn spawn(self, handle: ShowHandle, cancel: CancellationToken) -> JoinHandle<()> {
		tokio::spawn(async move {
			match self {
				Self::PushListener(listener) => listener.run(handle, cancel).await,
				Self::PollWatcher(watcher) => watcher.run(handle, cancel).await,
			}
		})
	}
}
