use crate::error::{Error, Result};
use crate::Config;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, layer::SubscriberExt, util::SubscriberInitExt, Layer};

pub fn init_tracing(config: &Config) -> Result<()> {
	let filter = EnvFilter::try_new(&config.rust_log).map_err(|e| Error::LogFilter(e.to_string()))?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(tracing_subscriber::fmt::layer().with_target(false).with_filter(filter))
		})
		.init();

	Ok(())
}
