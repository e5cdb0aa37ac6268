use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Simulated pyrotechnic controller", long_about = None)]
struct Config {
	/// Address to serve the API on
	#[arg(long, env = "SIMULATOR_ADDR", default_value = "127.0.0.1:8000")]
	addr: SocketAddr,

	/// Log filter
	#[arg(long, env = "RUST_LOG", default_value = "info,tower_http=debug")]
	rust_log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();

	tracing_subscriber::registry()
		.with(EnvFilter::try_new(&config.rust_log)?)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let listener = TcpListener::bind(config.addr).await?;
	tracing::info!("🎇 Pyrotechnic simulator listening on http://{}{}", listener.local_addr()?, pyro_simulator::API_PREFIX);

	axum::serve(listener, pyro_simulator::app())
		.with_graceful_shutdown(async {
			if let Err(e) = tokio::signal::ctrl_c().await {
				tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
			}
			tracing::info!("🛑 Shutdown signal received");
		})
		.await?;

	tracing::info!("✅ Simulator stopped");
	Ok(())
}
