use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};

/// One-way channel for operator-visible error messages.
///
/// Delivery is best effort: implementations log their own failures and never
/// hand them back to the caller.
#[async_trait]
pub trait AlertSink: Send + Sync {
	async fn notify(&self, message: &str);
}

/// Formats an alert the way the timer service displays it: `[14:32:07] ERROR: <detail>`
pub fn format_alert<Tz: TimeZone>(at: &DateTime<Tz>, detail: &str) -> String
where
	Tz::Offset: std::fmt::Display,
{
	format!("[{}] ERROR: {}", at.format("%H:%M:%S"), detail)
}

/// Formats an alert stamped with the local wall clock
pub fn format_alert_now(detail: &str) -> String {
	format_alert(&Local::now(), detail)
}
