//! Client for the pyrotechnic control REST API
//!
//! [`SequenceGateway`] implements [`show_core::Sequencer`] on top of a single
//! long-lived `reqwest` client, plus the administrative calls used to prepare
//! the controller at startup ([`SequenceGateway::bootstrap`]).

mod bootstrap;
pub mod client;
pub mod error;
pub mod models;

pub use client::{classify_status, GatewayConfig, SequenceGateway, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{BootstrapError, GatewayError, Result};
pub use models::{Sequence, SequenceStatus};
