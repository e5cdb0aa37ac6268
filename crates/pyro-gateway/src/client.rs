use crate::error::{GatewayError, Result};
use crate::models::Sequence;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use show_core::{format_alert_now, is_silent_sequence, Ack, AlertSink, SequenceError, SequenceOp, SequenceResult, Sequencer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Label used in errors and logs for calls that target no single sequence
const ALL_SEQUENCES: &str = "*";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
	/// Base URL of the control API, up to and excluding `/sequences`
	pub base_url: String,
	pub timeout: Duration,
}

impl Default for GatewayConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

/// HTTP client for the pyrotechnic control API.
///
/// One request per call, no retries. Refusals by the remote state machine
/// (4xx) are returned as [`SequenceError::Rejected`] and only logged. Anything
/// that means the controller is not doing its job (5xx, refused connection,
/// timeout) is returned as [`SequenceError::Unavailable`] and also pushed to
/// the operator through the [`AlertSink`].
pub struct SequenceGateway {
	client: Client,
	base_url: Url,
	alerts: Arc<dyn AlertSink>,
}

impl SequenceGateway {
	pub fn new(config: GatewayConfig, alerts: Arc<dyn AlertSink>) -> Result<Self> {
		let base_url = match Url::parse(config.base_url.trim_end_matches('/')) {
			Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => url,
			_ => return Err(GatewayError::BaseUrl(config.base_url)),
		};

		let client = Client::builder().timeout(config.timeout).build()?;

		info!("🔌 Pyrotechnic gateway targeting {} (timeout {:?})", base_url, config.timeout);
		Ok(Self { client, base_url, alerts })
	}

	pub fn base_url(&self) -> &str {
		self.base_url.as_str()
	}

	/// `DELETE /sequences`: drop every sequence and free all stages
	pub async fn reset(&self) -> SequenceResult {
		let request = self.client.delete(self.url(&[]));
		let response = self.execute(SequenceOp::Reset, ALL_SEQUENCES, request).await?;
		Ok(Ack::Remote {
			status: response.status().as_u16(),
		})
	}

	/// `POST /sequences?name=`
	pub async fn create(&self, name: &str) -> std::result::Result<Sequence, SequenceError> {
		let request = self.client.post(self.url(&[])).query(&[("name", name)]);
		let response = self.execute(SequenceOp::Create, name, request).await?;
		Self::body(SequenceOp::Create, name, response).await
	}

	/// `GET /sequences/{name}`
	pub async fn get(&self, name: &str) -> std::result::Result<Sequence, SequenceError> {
		let request = self.client.get(self.url(&[name]));
		let response = self.execute(SequenceOp::Fetch, name, request).await?;
		Self::body(SequenceOp::Fetch, name, response).await
	}

	/// `GET /sequences`
	pub async fn list(&self) -> std::result::Result<Vec<Sequence>, SequenceError> {
		let request = self.client.get(self.url(&[]));
		let response = self.execute(SequenceOp::List, ALL_SEQUENCES, request).await?;
		Self::body(SequenceOp::List, ALL_SEQUENCES, response).await
	}

	/// `DELETE /sequences/{name}`
	pub async fn delete(&self, name: &str) -> std::result::Result<Sequence, SequenceError> {
		let request = self.client.delete(self.url(&[name]));
		let response = self.execute(SequenceOp::Delete, name, request).await?;
		Self::body(SequenceOp::Delete, name, response).await
	}

	/// `{base}/sequences/{segments..}`, each segment percent-encoded
	fn url(&self, segments: &[&str]) -> Url {
		let mut url = self.base_url.clone();
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().push("sequences").extend(segments);
		}
		url
	}

	/// `PATCH /sequences/{name}/{stage}`, short-circuited for the silent sequence
	#[instrument(skip(self), level = "debug")]
	async fn transition(&self, op: SequenceOp, sequence: &str, stage: &str) -> SequenceResult {
		if is_silent_sequence(sequence) {
			debug!("🔇 {} of '{}' skipped: no firework", op, sequence);
			return Ok(Ack::Silent);
		}

		let request = self.client.request(Method::PATCH, self.url(&[sequence, stage]));
		let response = self.execute(op, sequence, request).await?;

		info!("🎆 {} of '{}' accepted", op, sequence);
		Ok(Ack::Remote {
			status: response.status().as_u16(),
		})
	}

	async fn execute(&self, op: SequenceOp, sequence: &str, request: RequestBuilder) -> std::result::Result<Response, SequenceError> {
		let outcome = match request.send().await {
			Ok(response) => classify_status(op, sequence, response.status()).map(|()| response),
			Err(e) => Err(SequenceError::Unavailable {
				op,
				sequence: sequence.to_string(),
				reason: transport_reason(&e),
			}),
		};

		if let Err(e) = &outcome {
			self.report(e).await;
		}
		outcome
	}

	async fn report(&self, error: &SequenceError) {
		match error {
			SequenceError::Rejected { .. } => warn!("⚠️ {}", error),
			SequenceError::Unavailable { .. } => {
				error!("❌ {}", error);
				self.alerts.notify(&format_alert_now(&error.to_string())).await;
			}
		}
	}

	async fn body<T: DeserializeOwned>(op: SequenceOp, sequence: &str, response: Response) -> std::result::Result<T, SequenceError> {
		response.json::<T>().await.map_err(|e| SequenceError::Unavailable {
			op,
			sequence: sequence.to_string(),
			reason: format!("invalid response body: {e}"),
		})
	}
}

#[async_trait]
impl Sequencer for SequenceGateway {
	async fn start(&self, sequence: &str) -> SequenceResult {
		self.transition(SequenceOp::Start, sequence, "running").await
	}

	async fn pause(&self, sequence: &str) -> SequenceResult {
		self.transition(SequenceOp::Pause, sequence, "pause").await
	}

	async fn resume(&self, sequence: &str) -> SequenceResult {
		self.transition(SequenceOp::Resume, sequence, "resume").await
	}

	async fn stop_all(&self) -> SequenceResult {
		let request = self.client.post(self.url(&["stop"]));
		let response = self.execute(SequenceOp::StopAll, ALL_SEQUENCES, request).await?;

		info!("🛑 Running sequence stopped");
		Ok(Ack::Remote {
			status: response.status().as_u16(),
		})
	}

	async fn approve_first_stage(&self, sequence: &str) -> SequenceResult {
		self.transition(SequenceOp::FirstStage, sequence, "first_stage").await
	}

	async fn approve_second_stage(&self, sequence: &str) -> SequenceResult {
		self.transition(SequenceOp::SecondStage, sequence, "second_stage").await
	}
}

/// 2xx passes, 4xx is a refusal, everything else means the controller is unavailable
pub fn classify_status(op: SequenceOp, sequence: &str, status: StatusCode) -> std::result::Result<(), SequenceError> {
	if status.is_success() {
		Ok(())
	} else if status.is_client_error() {
		Err(SequenceError::Rejected {
			op,
			sequence: sequence.to_string(),
			status: status.as_u16(),
		})
	} else {
		Err(SequenceError::Unavailable {
			op,
			sequence: sequence.to_string(),
			reason: format!("HTTP {status}"),
		})
	}
}

fn transport_reason(error: &reqwest::Error) -> String {
	if error.is_timeout() {
		"request timed out".to_string()
	} else if error.is_connect() {
		format!("connection failed: {error}")
	} else {
		error.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn four_hundreds_are_rejections() {
		for code in [400, 403, 404, 409] {
			let status = StatusCode::from_u16(code).unwrap();
			let err = classify_status(SequenceOp::Start, "sequence1", status).unwrap_err();
			assert_eq!(
				err,
				SequenceError::Rejected {
					op: SequenceOp::Start,
					sequence: "sequence1".into(),
					status: code,
				}
			);
		}
	}

	#[test]
	fn five_hundreds_are_unavailable() {
		for code in [500, 502, 503] {
			let status = StatusCode::from_u16(code).unwrap();
			let err = classify_status(SequenceOp::Pause, "sequence2", status).unwrap_err();
			assert!(err.is_unavailable(), "{code} should be unavailable");
		}
	}

	#[test]
	fn success_passes() {
		assert!(classify_status(SequenceOp::Resume, "sequence3", StatusCode::OK).is_ok());
		assert!(classify_status(SequenceOp::Resume, "sequence3", StatusCode::NO_CONTENT).is_ok());
	}
}
