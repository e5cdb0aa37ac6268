use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pyro_gateway::{Sequence, SequenceStatus};
use tower::ServiceExt;

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
	let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
	let response = app.clone().oneshot(request).await.unwrap();
	let status = response.status();
	let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
	(status, body.to_vec())
}

#[tokio::test]
async fn create_then_fetch() {
	let app = pyro_simulator::app();

	let (status, body) = call(&app, Method::POST, "/api/sequences?name=sequence1").await;
	assert_eq!(status, StatusCode::OK);
	let created: Sequence = serde_json::from_slice(&body).unwrap();
	assert_eq!(created.status, SequenceStatus::Saved);

	let (status, body) = call(&app, Method::GET, "/api/sequences/sequence1").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(serde_json::from_slice::<Sequence>(&body).unwrap(), created);

	let (_, body) = call(&app, Method::GET, "/api/sequences").await;
	assert_eq!(serde_json::from_slice::<Vec<Sequence>>(&body).unwrap(), vec![created]);
}

#[tokio::test]
async fn duplicate_is_forbidden_and_unknown_is_not_found() {
	let app = pyro_simulator::app();

	call(&app, Method::POST, "/api/sequences?name=sequence1").await;
	let (status, _) = call(&app, Method::POST, "/api/sequences?name=sequence1").await;
	assert_eq!(status, StatusCode::FORBIDDEN);

	let (status, _) = call(&app, Method::PATCH, "/api/sequences/nope/first_stage").await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, _) = call(&app, Method::DELETE, "/api/sequences/nope").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn skipping_a_stage_is_forbidden() {
	let app = pyro_simulator::app();
	call(&app, Method::POST, "/api/sequences?name=sequence1").await;

	let (status, body) = call(&app, Method::PATCH, "/api/sequences/sequence1/running").await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	let detail: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert!(detail["detail"].as_str().unwrap().contains("sequence1"));
}

#[tokio::test]
async fn stop_with_nothing_running_is_ok() {
	let app = pyro_simulator::app();

	let (status, body) = call(&app, Method::POST, "/api/sequences/stop").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, b"null");
}

#[tokio::test]
async fn reset_empties_the_store() {
	let app = pyro_simulator::app();
	call(&app, Method::POST, "/api/sequences?name=sequence1").await;

	let (status, _) = call(&app, Method::DELETE, "/api/sequences").await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = call(&app, Method::GET, "/api/sequences").await;
	assert_eq!(body, b"[]");
}
