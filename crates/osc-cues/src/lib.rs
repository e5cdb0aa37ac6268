//! OSC transport for show cues
//!
//! Inbound: the timer service pushes `/start`, `/pause`, `/resume`, `/stop`,
//! `/warning` and `/danger` over UDP; [`decode_packet`] turns a datagram into
//! [`show_core::CueEvent`]s and [`PushListener`] feeds them to the controller.
//!
//! Outbound: [`OscAlertSink`] shows operator alerts on the timer service.

pub mod alert;
pub mod decode;
pub mod error;
pub mod listener;

pub use alert::{OscAlertSink, ALERT_ADDRESS};
pub use decode::{decode_packet, encode_message, to_event};
pub use error::{DecodeError, TransportError};
pub use listener::PushListener;
