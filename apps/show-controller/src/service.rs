use crate::error::Result;
use crate::source::CueSource;
use crate::Config;
use osc_cues::OscAlertSink;
use pyro_gateway::SequenceGateway;
use show_audio::PlaybackEngine;
use show_core::{AlertSink, EventMap, ShowController, ShowOrchestrator, TrackLibrary};
use std::sync::Arc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Wires the cue source, the controller task and its collaborators
pub struct ShowService {
	config: Config,
	orchestrator: ShowOrchestrator,
	source: CueSource,
}

impl ShowService {
	/// Load the cue mapping, prepare the pyrotechnic controller and open audio.
	///
	/// Fails if the pyrotechnic controller cannot be reached.
	pub async fn new(config: Config) -> Result<Self> {
		tracing::info!("🎆 Initializing show controller");

		let alerts: Arc<dyn AlertSink> = Arc::new(OscAlertSink::connect(config.osc_alert_addr).await?);
		let gateway = Arc::new(SequenceGateway::new(config.gateway(), alerts)?);

		let event_map = EventMap::load_or_create(&config.mapping_file);
		let library = TrackLibrary::new(&config.audio_dir);
		report_tracks(&library, &event_map);

		gateway.bootstrap(event_map.firing_sequences()).await?;

		let playback = Arc::new(PlaybackEngine::spawn()?);
		let orchestrator = ShowOrchestrator::new(event_map, library, playback, gateway);
		let source = CueSource::from_config(&config).await?;

		Ok(Self { config, orchestrator, source })
	}

	/// Run until Ctrl-C, then stop the source and shut the show down
	pub async fn run(self) -> Result<()> {
		let Self { config, orchestrator, source } = self;
		let shutdown_token = CancellationToken::new();

		let signal_token = shutdown_token.clone();
		tokio::spawn(async move {
			match tokio::signal::ctrl_c().await {
				Ok(()) => {
					tracing::info!("🛑 Shutdown signal received");
					signal_token.cancel();
				}
				Err(e) => {
					tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
				}
			}
		});

		let controller = ShowController::spawn(orchestrator, CancellationToken::new());
		tracing::info!("🚀 Show running, cues from {}", source.name());
		let source_task = source.spawn(controller.handle(), shutdown_token.clone());

		shutdown_token.cancelled().await;
		tracing::info!("🔄 Initiating graceful shutdown...");

		if timeout(config.shutdown_timeout(), source_task).await.is_err() {
			tracing::warn!("⚠️ Cue source did not stop within {:?}", config.shutdown_timeout());
		}

		let last = controller.shutdown().await?;
		tracing::info!("✅ Graceful shutdown complete, {} cues warned, {} dangered", last.warned.len(), last.dangered.len());
		Ok(())
	}
}

fn report_tracks(library: &TrackLibrary, event_map: &EventMap) {
	match library.available_tracks() {
		Ok(available) => {
			tracing::info!("🎵 Audio directory {}: {:?}", library.dir().display(), available);
			for track in event_map.tracks() {
				if !available.iter().any(|name| name == track) {
					tracing::warn!("⚠️ Mapped track '{}' is missing from {}", track, library.dir().display());
				}
			}
		}
		Err(e) => tracing::warn!("⚠️ Audio directory {} not readable: {}", library.dir().display(), e),
	}
}
