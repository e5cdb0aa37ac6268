use crate::decode::decode_packet;
use crate::error::TransportError;
use show_core::{CueEvent, ShowHandle};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Largest datagram accepted from the timer service
const MAX_DATAGRAM: usize = 4096;

/// Receives OSC cues pushed by the timer service over UDP
pub struct PushListener {
	socket: UdpSocket,
}

impl PushListener {
	pub async fn bind(addr: SocketAddr) -> Result<Self, TransportError> {
		let socket = UdpSocket::bind(addr).await?;
		info!("📡 Listening for OSC cues on {}", socket.local_addr()?);
		Ok(Self { socket })
	}

	pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
		Ok(self.socket.local_addr()?)
	}

	/// Wait for the next datagram that decodes to at least one event.
	///
	/// Undecodable datagrams are logged and skipped; only socket errors are returned.
	pub async fn recv(&self) -> Result<Vec<CueEvent>, TransportError> {
		let mut buf = [0u8; MAX_DATAGRAM];
		loop {
			let (len, peer) = self.socket.recv_from(&mut buf).await?;
			match decode_packet(&buf[..len]) {
				Ok(events) if !events.is_empty() => return Ok(events),
				Ok(_) => debug!("Empty OSC bundle from {}", peer),
				Err(e) => warn!("⚠️ Dropping datagram from {}: {}", peer, e),
			}
		}
	}

	/// Forward decoded cues to the controller until cancelled or the controller closes
	pub async fn run(self, handle: ShowHandle, cancel: CancellationToken) {
		loop {
			tokio::select! {
				() = cancel.cancelled() => {
					info!("🛑 OSC listener shutting down");
					break;
				}
				received = self.recv() => match received {
					Ok(events) => {
						for event in events {
							debug!("📨 Cue received: {}", event);
							if handle.dispatch(event).is_err() {
								warn!("⚠️ Show controller closed, stopping OSC listener");
								return;
							}
						}
					}
					Err(e) => warn!("⚠️ OSC receive failed: {}", e),
				}
			}
		}

		info!("✅ OSC listener stopped");
	}
}
