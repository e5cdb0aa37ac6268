use crate::clock::PlayClock;
use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use show_core::{Playback, PlaybackError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

type Reply<T> = oneshot::Sender<T>;

#[derive(Debug)]
enum AudioCommand {
	Load(PathBuf, Reply<Result<(), PlaybackError>>),
	Play(u64, Reply<Result<(), PlaybackError>>),
	Pause(Reply<Option<u64>>),
	Stop(Reply<()>),
	Position(Reply<Option<u64>>),
}

/// Handle to the audio thread.
///
/// The output stream is not `Send`, so it is opened on a dedicated OS thread
/// and driven by commands. Dropping every handle ends the thread.
#[derive(Clone, Debug)]
pub struct PlaybackEngine {
	command_tx: mpsc::UnboundedSender<AudioCommand>,
}

impl PlaybackEngine {
	/// Open the default output device and start the audio thread
	pub fn spawn() -> Result<Self, PlaybackError> {
		let (command_tx, command_rx) = mpsc::unbounded_channel();
		let (ready_tx, ready_rx) = std::sync::mpsc::channel();

		thread::Builder::new()
			.name("show-audio".into())
			.spawn(move || match OutputStream::try_default() {
				Ok((stream, handle)) => {
					let _ = ready_tx.send(Ok(()));
					AudioThread::new(stream, handle).run(command_rx);
				}
				Err(e) => {
					let _ = ready_tx.send(Err(PlaybackError::Device(e.to_string())));
				}
			})
			.map_err(|e| PlaybackError::Device(e.to_string()))?;

		ready_rx.recv().map_err(|e| PlaybackError::Device(e.to_string()))??;

		info!("🔊 Audio output ready");
		Ok(Self { command_tx })
	}

	async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> AudioCommand) -> Option<T> {
		let (tx, rx) = oneshot::channel();
		if self.command_tx.send(command(tx)).is_err() {
			error!("❌ Audio thread is gone");
			return None;
		}
		rx.await.ok()
	}
}

#[async_trait]
impl Playback for PlaybackEngine {
	async fn load(&self, path: &Path) -> Result<(), PlaybackError> {
		let path = path.to_path_buf();
		self.request(|reply| AudioCommand::Load(path, reply)).await.unwrap_or_else(|| Err(thread_gone()))
	}

	async fn play(&self) -> Result<(), PlaybackError> {
		self.play_from(0).await
	}

	async fn play_from(&self, offset_ms: u64) -> Result<(), PlaybackError> {
		self.request(|reply| AudioCommand::Play(offset_ms, reply)).await.unwrap_or_else(|| Err(thread_gone()))
	}

	async fn pause(&self) -> Option<u64> {
		self.request(AudioCommand::Pause).await.flatten()
	}

	async fn stop(&self) {
		self.request(AudioCommand::Stop).await;
	}

	async fn position(&self) -> Option<u64> {
		self.request(AudioCommand::Position).await.flatten()
	}
}

fn thread_gone() -> PlaybackError {
	PlaybackError::Device("audio thread stopped".into())
}

/// Opens and decodes a track, failing with `TrackNotFound` or `Decode`
pub fn open_track(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
	if !path.is_file() {
		return Err(PlaybackError::TrackNotFound(path.to_path_buf()));
	}

	let file = File::open(path).map_err(|e| PlaybackError::Decode {
		path: path.to_path_buf(),
		reason: e.to_string(),
	})?;

	Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
		path: path.to_path_buf(),
		reason: e.to_string(),
	})
}

/// State owned by the audio thread
struct AudioThread {
	_stream: OutputStream,
	handle: OutputStreamHandle,
	sink: Option<Sink>,
	loaded: Option<PathBuf>,
	clock: PlayClock,
}

impl AudioThread {
	fn new(stream: OutputStream, handle: OutputStreamHandle) -> Self {
		Self {
			_stream: stream,
			handle,
			sink: None,
			loaded: None,
			clock: PlayClock::new(),
		}
	}

	fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<AudioCommand>) {
		while let Some(command) = command_rx.blocking_recv() {
			match command {
				AudioCommand::Load(path, reply) => {
					let _ = reply.send(self.load(path));
				}
				AudioCommand::Play(offset_ms, reply) => {
					let _ = reply.send(self.play(offset_ms));
				}
				AudioCommand::Pause(reply) => {
					let _ = reply.send(self.pause());
				}
				AudioCommand::Stop(reply) => {
					self.stop();
					let _ = reply.send(());
				}
				AudioCommand::Position(reply) => {
					let _ = reply.send(self.position());
				}
			}
		}

		self.stop();
		debug!("Audio thread exiting");
	}

	fn load(&mut self, path: PathBuf) -> Result<(), PlaybackError> {
		self.stop();
		open_track(&path)?;

		debug!("🎵 Loaded {}", path.display());
		self.loaded = Some(path);
		Ok(())
	}

	fn play(&mut self, offset_ms: u64) -> Result<(), PlaybackError> {
		let path = self.loaded.clone().ok_or(PlaybackError::NothingLoaded)?;

		// A fresh decoder per play, skipped to the requested offset
		let decoder = open_track(&path)?;
		let length = decoder.total_duration();
		let source = decoder.skip_duration(Duration::from_millis(offset_ms));

		if let Some(sink) = self.sink.take() {
			sink.stop();
		}
		let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
		sink.append(source);
		sink.play();

		self.sink = Some(sink);
		self.clock.start(offset_ms, Instant::now());
		self.clock.set_length(length);
		debug!("▶️ Playing {} from {}ms", path.display(), offset_ms);
		Ok(())
	}

	fn pause(&mut self) -> Option<u64> {
		let sink = self.sink.as_ref()?;
		if !self.clock.is_running() {
			warn!("⚠️ Pause requested while audio is not playing");
			return None;
		}

		sink.pause();
		Some(self.clock.pause(Instant::now()))
	}

	fn stop(&mut self) {
		if let Some(sink) = self.sink.take() {
			sink.stop();
		}
		self.loaded = None;
		self.clock.reset();
	}

	fn position(&self) -> Option<u64> {
		self.loaded.as_ref()?;
		self.sink.as_ref().map(|_| self.clock.position_at(Instant::now()))
	}
}
