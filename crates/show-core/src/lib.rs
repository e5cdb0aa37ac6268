//! Show control core
//!
//! Owns the show-event state machine: cue events from the timer service are
//! resolved through the [`EventMap`] into an audio track and a pyrotechnic
//! sequence, and the [`ShowOrchestrator`] drives its collaborators
//! ([`Playback`], [`Sequencer`]) in a fixed order.
//!
//! The orchestrator is not thread-safe on purpose. It is owned by a single
//! consumer task inside [`ShowController`], and every cue source feeds that
//! task through a [`ShowHandle`].

pub mod alert;
pub mod controller;
pub mod cue;
pub mod error;
pub mod event_map;
pub mod library;
pub mod orchestrator;
pub mod ports;
pub mod state;

pub use alert::{format_alert, format_alert_now, AlertSink};
pub use controller::{ShowController, ShowHandle};
pub use cue::{CueEvent, CueId};
pub use error::{EventMapError, PlaybackError, Result, SequenceError, ShowError};
pub use event_map::{is_silent_sequence, CueMapping, EventMap, SILENT_SEQUENCE};
pub use library::TrackLibrary;
pub use orchestrator::ShowOrchestrator;
pub use ports::{Ack, Playback, SequenceOp, SequenceResult, Sequencer};
pub use state::{ApprovalState, PlaybackState, ShowSnapshot};
