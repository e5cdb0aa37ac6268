use show_core::SequenceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
	#[error("Failed to build HTTP client: {0}")]
	Client(#[from] reqwest::Error),

	#[error("Invalid base URL '{0}'")]
	BaseUrl(String),
}

/// Startup failures; any of these aborts the controller
#[derive(Error, Debug)]
pub enum BootstrapError {
	#[error("Failed to reset the pyrotechnic controller: {0}")]
	Reset(#[source] SequenceError),

	#[error("Failed to create sequence: {0}")]
	Create(#[source] SequenceError),
}
