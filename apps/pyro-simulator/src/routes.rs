use crate::error::StoreError;
use crate::store::SequenceStore;
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use pyro_gateway::{Sequence, SequenceStatus};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

pub type SharedStore = Arc<RwLock<SequenceStore>>;

type ApiResult<T> = Result<Json<T>, StoreError>;

#[derive(Debug, Deserialize)]
pub struct CreateParams {
	name: String,
}

/// `/sequences` routes, to be nested under the API prefix
pub fn sequence_routes() -> Router<SharedStore> {
	Router::new()
		.route("/sequences", get(list_sequences).post(create_sequence).delete(reset))
		.route("/sequences/stop", post(stop_running))
		.route("/sequences/:name", get(get_sequence).delete(delete_sequence))
		.route("/sequences/:name/first_stage", patch(to_first_stage))
		.route("/sequences/:name/second_stage", patch(to_second_stage))
		.route("/sequences/:name/running", patch(to_running))
		.route("/sequences/:name/pause", patch(pause_sequence))
		.route("/sequences/:name/resume", patch(resume_sequence))
}

async fn list_sequences(State(store): State<SharedStore>) -> Json<Vec<Sequence>> {
	Json(store.read().await.list())
}

#[instrument(skip(store))]
async fn create_sequence(State(store): State<SharedStore>, Query(params): Query<CreateParams>) -> ApiResult<Sequence> {
	let sequence = store.write().await.create(&params.name)?;
	info!("🧨 Created '{}'", sequence.name);
	Ok(Json(sequence))
}

#[instrument(skip(store))]
async fn reset(State(store): State<SharedStore>) -> Json<()> {
	store.write().await.reset();
	info!("♻️ Controller reset");
	Json(())
}

async fn get_sequence(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	Ok(Json(store.read().await.get(&name)?))
}

#[instrument(skip(store))]
async fn delete_sequence(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	Ok(Json(store.write().await.delete(&name)?))
}

async fn advance(store: &SharedStore, name: &str, to: SequenceStatus) -> ApiResult<Sequence> {
	let sequence = store.write().await.advance(name, to)?;
	info!("🎆 '{}' is now {}", name, sequence.status);
	Ok(Json(sequence))
}

#[instrument(skip(store))]
async fn to_first_stage(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	advance(&store, &name, SequenceStatus::FirstStage).await
}

#[instrument(skip(store))]
async fn to_second_stage(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	advance(&store, &name, SequenceStatus::SecondStage).await
}

#[instrument(skip(store))]
async fn to_running(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	advance(&store, &name, SequenceStatus::Running).await
}

#[instrument(skip(store))]
async fn pause_sequence(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	let sequence = store.write().await.pause(&name)?;
	info!("⏸️ '{}' paused", name);
	Ok(Json(sequence))
}

#[instrument(skip(store))]
async fn resume_sequence(State(store): State<SharedStore>, Path(name): Path<String>) -> ApiResult<Sequence> {
	let sequence = store.write().await.resume(&name)?;
	info!("▶️ '{}' resumed", name);
	Ok(Json(sequence))
}

#[instrument(skip(store))]
async fn stop_running(State(store): State<SharedStore>) -> Json<Option<Sequence>> {
	let stopped = store.write().await.stop();
	match &stopped {
		Some(sequence) => info!("🛑 '{}' stopped", sequence.name),
		None => info!("🛑 Stop requested, nothing running"),
	}
	Json(stopped)
}
