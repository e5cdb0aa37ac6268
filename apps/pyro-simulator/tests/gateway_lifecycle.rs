use async_trait::async_trait;
use pyro_gateway::{GatewayConfig, SequenceGateway, SequenceStatus};
use show_core::{Ack, AlertSink, SequenceError, SequenceOp, Sequencer};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingAlerts(Mutex<Vec<String>>);

#[async_trait]
impl AlertSink for RecordingAlerts {
	async fn notify(&self, message: &str) {
		self.0.lock().unwrap().push(message.to_string());
	}
}

async fn simulator_gateway() -> (SequenceGateway, Arc<RecordingAlerts>) {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, pyro_simulator::app()).await.unwrap();
	});

	let alerts = Arc::new(RecordingAlerts::default());
	let config = GatewayConfig {
		base_url: format!("http://{addr}/api"),
		timeout: Duration::from_secs(2),
	};
	(SequenceGateway::new(config, alerts.clone()).unwrap(), alerts)
}

#[tokio::test]
async fn full_show_lifecycle() {
	let (gateway, alerts) = simulator_gateway().await;

	let created = gateway.bootstrap(["countdown", "sequence1", "sequence2"]).await.unwrap();
	assert_eq!(created, 2);
	assert_eq!(gateway.list().await.unwrap().len(), 2);

	gateway.approve_first_stage("sequence1").await.unwrap();
	assert_eq!(gateway.get("sequence1").await.unwrap().status, SequenceStatus::FirstStage);

	gateway.approve_second_stage("sequence1").await.unwrap();
	assert_eq!(gateway.start("sequence1").await, Ok(Ack::Remote { status: 200 }));
	assert_eq!(gateway.get("sequence1").await.unwrap().status, SequenceStatus::Running);

	gateway.pause("sequence1").await.unwrap();
	assert_eq!(gateway.get("sequence1").await.unwrap().status, SequenceStatus::Paused);

	gateway.resume("sequence1").await.unwrap();
	assert_eq!(gateway.get("sequence1").await.unwrap().status, SequenceStatus::Running);

	gateway.stop_all().await.unwrap();
	assert_eq!(gateway.get("sequence1").await.unwrap().status, SequenceStatus::Stopped);

	assert!(alerts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn refused_transitions_are_rejections_without_alerts() {
	let (gateway, alerts) = simulator_gateway().await;
	gateway.bootstrap(["sequence1"]).await.unwrap();

	// No approvals yet
	let err = gateway.start("sequence1").await.unwrap_err();
	assert_eq!(
		err,
		SequenceError::Rejected {
			op: SequenceOp::Start,
			sequence: "sequence1".into(),
			status: 403,
		}
	);

	let err = gateway.approve_first_stage("missing").await.unwrap_err();
	assert!(matches!(err, SequenceError::Rejected { status: 404, .. }));

	let err = gateway.create("sequence1").await.unwrap_err();
	assert!(matches!(err, SequenceError::Rejected { op: SequenceOp::Create, status: 403, .. }));

	assert!(alerts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn bootstrap_starts_from_a_clean_controller() {
	let (gateway, _) = simulator_gateway().await;

	gateway.bootstrap(["sequence1"]).await.unwrap();
	gateway.approve_first_stage("sequence1").await.unwrap();

	// A second run resets, so creating the same name succeeds again
	assert_eq!(gateway.bootstrap(["sequence1"]).await.unwrap(), 1);
	assert_eq!(gateway.get("sequence1").await.unwrap().status, SequenceStatus::Saved);

	let deleted = gateway.delete("sequence1").await.unwrap();
	assert_eq!(deleted.name, "sequence1");
	assert!(gateway.list().await.unwrap().is_empty());
}
