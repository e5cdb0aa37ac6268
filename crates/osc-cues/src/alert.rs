use crate::decode::encode_message;
use crate::error::TransportError;
use async_trait::async_trait;
use rosc::OscType;
use show_core::AlertSink;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{error, info};

pub const ALERT_ADDRESS: &str = "/message";

/// Shows alerts on the timer service by sending OSC `/message`
pub struct OscAlertSink {
	socket: UdpSocket,
	target: SocketAddr,
}

impl OscAlertSink {
	pub async fn connect(target: SocketAddr) -> Result<Self, TransportError> {
		let local: SocketAddr = if target.is_ipv4() { ([0, 0, 0, 0], 0).into() } else { (std::net::Ipv6Addr::UNSPECIFIED, 0).into() };
		let socket = UdpSocket::bind(local).await?;
		info!("📣 Alerts go to {}{}", target, ALERT_ADDRESS);
		Ok(Self { socket, target })
	}

	async fn send(&self, message: &str) -> Result<(), TransportError> {
		let bytes = encode_message(ALERT_ADDRESS, vec![OscType::String(message.to_string())])?;
		self.socket.send_to(&bytes, self.target).await?;
		Ok(())
	}
}

#[async_trait]
impl AlertSink for OscAlertSink {
	async fn notify(&self, message: &str) {
		match self.send(message).await {
			Ok(()) => info!("📣 Alert sent: {}", message),
			Err(e) => error!("❌ Failed to send alert '{}': {}", message, e),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rosc::OscPacket;

	#[tokio::test]
	async fn alert_is_an_osc_message_with_one_string() {
		let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
		let sink = OscAlertSink::connect(receiver.local_addr().unwrap()).await.unwrap();

		sink.notify("[14:32:07] ERROR: start of 'sequence1' failed").await;

		let mut buf = [0u8; 1024];
		let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
		let (_, packet) = rosc::decoder::decode_udp(&buf[..len]).unwrap();
		let OscPacket::Message(message) = packet else {
			panic!("expected a message, got {packet:?}");
		};
		assert_eq!(message.addr, "/message");
		assert_eq!(message.args, vec![OscType::String("[14:32:07] ERROR: start of 'sequence1' failed".into())]);
	}
}
