use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves track names from the event map to files on disk
#[derive(Debug, Clone)]
pub struct TrackLibrary {
	dir: PathBuf,
	extension: String,
}

impl TrackLibrary {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			extension: "mp3".to_string(),
		}
	}

	pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
		self.extension = extension.into();
		self
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn path_for(&self, track: &str) -> PathBuf {
		self.dir.join(format!("{track}.{}", self.extension))
	}

	/// Track names present in the directory, sorted
	pub fn available_tracks(&self) -> io::Result<Vec<String>> {
		let mut tracks: Vec<String> = fs::read_dir(&self.dir)?
			.filter_map(|entry| entry.ok().map(|e| e.path()))
			.filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension)))
			.filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
			.collect();
		tracks.sort();
		Ok(tracks)
	}
}
