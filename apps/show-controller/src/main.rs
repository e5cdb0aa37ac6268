use anyhow::Result;
use clap::Parser;
use show_controller::{init_tracing, Config, ShowService};

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();
	init_tracing(&config)?;

	let service = match ShowService::new(config).await {
		Ok(service) => service,
		Err(e) => {
			tracing::error!("❌ Startup failed: {}", e);
			return Err(e.into());
		}
	};

	service.run().await?;
	Ok(())
}
