use clap::{Parser, ValueEnum};
use pyro_gateway::{GatewayConfig, DEFAULT_BASE_URL};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Where cue events come from
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueSourceKind {
	/// OSC datagrams pushed by the timer service
	Push,
	/// Periodic HTTP polls of the timer service
	Poll,
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Synchronizes show audio and pyrotechnic sequences with the show timer", long_about = None)]
pub struct Config {
	/// Base URL of the pyrotechnic control API
	#[arg(long, env = "FIREWORK_API_URL", default_value = DEFAULT_BASE_URL)]
	pub firework_api_url: String,

	/// UDP address receiving OSC cues
	#[arg(long, env = "OSC_LISTEN_ADDR", default_value = "127.0.0.1:9999")]
	pub osc_listen_addr: SocketAddr,

	/// Timer service address receiving OSC alerts
	#[arg(long, env = "OSC_ALERT_ADDR", default_value = "127.0.0.1:4001")]
	pub osc_alert_addr: SocketAddr,

	/// Directory holding the show tracks
	#[arg(long, env = "AUDIO_DIR", default_value = "audio")]
	pub audio_dir: PathBuf,

	/// Cue mapping file, created with defaults if missing
	#[arg(long, env = "MAPPING_FILE", default_value = "event_mapping.json")]
	pub mapping_file: PathBuf,

	#[arg(long, env = "CUE_SOURCE", value_enum, default_value = "push")]
	pub cue_source: CueSourceKind,

	/// Timer service status endpoint, used by the poll source
	#[arg(long, env = "POLL_URL", default_value = "http://127.0.0.1:4001/api/poll")]
	pub poll_url: String,

	#[arg(long, env = "POLL_INTERVAL_MS", default_value = "500")]
	pub poll_interval_ms: u64,

	/// Timeout of every pyrotechnic API request
	#[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "3000")]
	pub request_timeout_ms: u64,

	#[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value = "10")]
	pub shutdown_timeout_secs: u64,

	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log filter
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub rust_log: String,
}

impl Config {
	pub fn gateway(&self) -> GatewayConfig {
		GatewayConfig {
			base_url: self.firework_api_url.clone(),
			timeout: Duration::from_millis(self.request_timeout_ms),
		}
	}

	pub const fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}

	pub const fn shutdown_timeout(&self) -> Duration {
		Duration::from_secs(self.shutdown_timeout_secs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_show_network() {
		let config = Config::try_parse_from(["show-controller"]).unwrap();

		assert_eq!(config.firework_api_url, "http://localhost:8000/api");
		assert_eq!(config.osc_listen_addr, "127.0.0.1:9999".parse().unwrap());
		assert_eq!(config.osc_alert_addr, "127.0.0.1:4001".parse().unwrap());
		assert_eq!(config.cue_source, CueSourceKind::Push);
		assert_eq!(config.gateway().timeout, Duration::from_secs(3));
	}

	#[test]
	fn poll_source_from_flag() {
		let config = Config::try_parse_from(["show-controller", "--cue-source", "poll", "--poll-interval-ms", "250"]).unwrap();

		assert_eq!(config.cue_source, CueSourceKind::Poll);
		assert_eq!(config.poll_interval(), Duration::from_millis(250));
	}
}
