use crate::cue::CueEvent;
use crate::error::{Result, ShowError};
use crate::orchestrator::ShowOrchestrator;
use crate::state::ShowSnapshot;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Messages accepted by the controller task
#[derive(Debug)]
enum ShowCommand {
	Cue(CueEvent),
	Snapshot(oneshot::Sender<ShowSnapshot>),
}

/// Cloneable sender side of the controller queue.
///
/// Every cue source holds one of these; the queue is the only way to reach
/// the orchestrator.
#[derive(Clone, Debug)]
pub struct ShowHandle {
	command_tx: mpsc::UnboundedSender<ShowCommand>,
}

impl ShowHandle {
	/// Enqueue a cue, processed after every cue already queued
	pub fn dispatch(&self, event: CueEvent) -> Result<()> {
		self.command_tx.send(ShowCommand::Cue(event)).map_err(|_| ShowError::Closed)
	}

	/// Snapshot of the local state once all earlier cues have been handled
	pub async fn snapshot(&self) -> Result<ShowSnapshot> {
		let (tx, rx) = oneshot::channel();
		self.command_tx.send(ShowCommand::Snapshot(tx)).map_err(|_| ShowError::Closed)?;
		rx.await.map_err(|_| ShowError::Closed)
	}
}

/// Owns the orchestrator on a single consumer task.
///
/// Cues are handled strictly one at a time in arrival order; a handler runs
/// to completion, gateway calls included, before the next cue is dequeued.
pub struct ShowController {
	handle: ShowHandle,
	cancel_token: CancellationToken,
	task_handle: JoinHandle<ShowSnapshot>,
}

impl ShowController {
	pub fn spawn(orchestrator: ShowOrchestrator, cancel_token: CancellationToken) -> Self {
		let (command_tx, command_rx) = mpsc::unbounded_channel();
		let task_handle = tokio::spawn(run(orchestrator, command_rx, cancel_token.clone()));

		info!("🎬 Show controller started");

		Self {
			handle: ShowHandle { command_tx },
			cancel_token,
			task_handle,
		}
	}

	pub fn handle(&self) -> ShowHandle {
		self.handle.clone()
	}

	/// Cancel the controller, stop audio and sequences, and return the final state
	pub async fn shutdown(self) -> Result<ShowSnapshot> {
		self.cancel_token.cancel();
		self.task_handle.await.map_err(|_| ShowError::Closed)
	}
}

async fn run(mut orchestrator: ShowOrchestrator, mut command_rx: mpsc::UnboundedReceiver<ShowCommand>, cancel: CancellationToken) -> ShowSnapshot {
	loop {
		tokio::select! {
			biased;

			command = command_rx.recv() => {
				match command {
					Some(ShowCommand::Cue(event)) => orchestrator.handle(event).await,
					Some(ShowCommand::Snapshot(reply)) => {
						let _ = reply.send(orchestrator.snapshot());
					}
					None => {
						debug!("All show handles dropped");
						break;
					}
				}
			}

			() = cancel.cancelled() => {
				info!("🛑 Show controller shutting down");
				break;
			}
		}
	}

	command_rx.close();
	let mut dropped = 0usize;
	while let Ok(command) = command_rx.try_recv() {
		if let ShowCommand::Snapshot(reply) = command {
			let _ = reply.send(orchestrator.snapshot());
		} else {
			dropped += 1;
		}
	}
	if dropped > 0 {
		warn!("⚠️ Dropped {} queued cues on shutdown", dropped);
	}

	orchestrator.on_stop().await;
	info!("✅ Show controller stopped");
	orchestrator.snapshot()
}
