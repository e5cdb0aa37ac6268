use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("Gateway error: {0}")]
	Gateway(#[from] pyro_gateway::GatewayError),

	#[error("Bootstrap failed: {0}")]
	Bootstrap(#[from] pyro_gateway::BootstrapError),

	#[error("Audio error: {0}")]
	Playback(#[from] show_core::PlaybackError),

	#[error("OSC transport error: {0}")]
	Transport(#[from] osc_cues::TransportError),

	#[error("Show controller error: {0}")]
	Show(#[from] show_core::ShowError),

	#[error("Poll request failed: {0}")]
	Poll(#[from] reqwest::Error),

	#[error("JSON parsing error: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("Invalid log filter: {0}")]
	LogFilter(String),
}
