use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pyro_gateway::SequenceStatus;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
	#[error("Sequence '{0}' does not exist")]
	NotFound(String),

	#[error("Sequence '{0}' already exists")]
	AlreadyExists(String),

	#[error("Sequence '{name}' cannot go from {from} to {to}")]
	Forbidden { name: String, from: SequenceStatus, to: SequenceStatus },

	#[error("Stage {stage} is held by '{holder}'")]
	StageOccupied { stage: SequenceStatus, holder: String },
}

impl StoreError {
	pub const fn status_code(&self) -> StatusCode {
		match self {
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::AlreadyExists(_) | Self::Forbidden { .. } | Self::StageOccupied { .. } => StatusCode::FORBIDDEN,
		}
	}
}

impl IntoResponse for StoreError {
	fn into_response(self) -> Response {
		tracing::warn!("⚠️ {}", self);
		(self.status_code(), Json(json!({ "detail": self.to_string() }))).into_response()
	}
}
