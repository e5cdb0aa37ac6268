use thiserror::Error;

/// An inbound datagram that could not be turned into cue events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
	#[error("Malformed OSC packet: {0}")]
	Malformed(String),

	#[error("{address} without a cue id")]
	MissingCueId { address: String },

	#[error("{address} with unusable cue id {arg}")]
	InvalidCueId { address: String, arg: String },
}

#[derive(Error, Debug)]
pub enum TransportError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to encode OSC packet: {0}")]
	Encode(String),
}
