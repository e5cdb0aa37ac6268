pub mod config;
pub mod error;
pub mod poll;
pub mod service;
pub mod source;
pub mod telemetry;

pub use config::{Config, CueSourceKind};
pub use error::{Error, Result};
pub use poll::{diff_snapshots, parse_poll, PollWatcher, TimerSnapshot};
pub use service::ShowService;
pub use source::CueSource;
pub use telemetry::init_tracing;
