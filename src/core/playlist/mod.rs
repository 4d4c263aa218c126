//! Background music
//!
//! Plays randomly chosen tracks from a fixed list, picking a new one
//! whenever the output reports the current track has finished.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Audio output collaborator
pub trait AudioOutput {
    /// Start playing `track`, replacing anything queued
    fn play(&mut self, track: &Path) -> Result<()>;
    /// True once the last started track has played out
    fn is_finished(&self) -> bool;
}

/// rodio-backed output with a fixed volume
pub struct RodioOutput {
    sink: Sink,
    _stream: OutputStream,
}

impl RodioOutput {
    pub fn new(volume: f32) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.set_volume(volume.clamp(0.0, 1.0));
        Ok(Self {
            sink,
            _stream: stream,
        })
    }
}

impl AudioOutput for RodioOutput {
    fn play(&mut self, track: &Path) -> Result<()> {
        let file = File::open(track)?;
        let source = Decoder::new(BufReader::new(file))?;
        self.sink.stop();
        self.sink.append(source);
        self.sink.play();
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

pub struct Playlist {
    tracks: Vec<PathBuf>,
    current: Option<usize>,
    output: Box<dyn AudioOutput>,
    rng: StdRng,
}

impl Playlist {
    /// Build the playlist and start the first random track
    pub fn new(tracks: Vec<PathBuf>, output: Box<dyn AudioOutput>) -> Self {
        Self::with_rng(tracks, output, StdRng::from_os_rng())
    }

    pub fn with_rng(tracks: Vec<PathBuf>, output: Box<dyn AudioOutput>, rng: StdRng) -> Self {
        let mut playlist = Self {
            tracks,
            current: None,
            output,
            rng,
        };
        playlist.play_random();
        playlist
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.map(|i| self.tracks[i].as_path())
    }

    /// Check the finished signal; start a new track when it fires.
    /// Returns the new track, if one was started.
    pub fn tick(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() || !self.output.is_finished() {
            return None;
        }
        self.play_random();
        self.current()
    }

    /// Uniform pick; the same track may come up twice in a row
    fn play_random(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let index = self.rng.random_range(0..self.tracks.len());
        self.current = Some(index);
        let track = &self.tracks[index];
        match self.output.play(track) {
            Ok(()) => tracing::info!("Now playing {:?}", track),
            Err(e) => tracing::warn!("Cannot play {:?}: {}", track, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Output that finishes whenever the test says so
    #[derive(Clone, Default)]
    struct FakeOutput {
        played: Rc<RefCell<Vec<PathBuf>>>,
        finished: Rc<Cell<bool>>,
    }

    impl AudioOutput for FakeOutput {
        fn play(&mut self, track: &Path) -> Result<()> {
            self.played.borrow_mut().push(track.to_path_buf());
            self.finished.set(false);
            Ok(())
        }

        fn is_finished(&self) -> bool {
            self.finished.get()
        }
    }

    fn tracks() -> Vec<PathBuf> {
        vec!["a.ogg".into(), "b.ogg".into(), "c.ogg".into()]
    }

    #[test]
    fn test_starts_playing_on_construction() {
        let output = FakeOutput::default();
        let playlist =
            Playlist::with_rng(tracks(), Box::new(output.clone()), StdRng::seed_from_u64(1));
        assert_eq!(output.played.borrow().len(), 1);
        assert!(playlist.tracks().contains(&playlist.current().unwrap().to_path_buf()));
    }

    #[test]
    fn test_advances_only_when_finished() {
        let output = FakeOutput::default();
        let mut playlist =
            Playlist::with_rng(tracks(), Box::new(output.clone()), StdRng::seed_from_u64(2));

        assert!(playlist.tick().is_none());
        assert_eq!(output.played.borrow().len(), 1);

        output.finished.set(true);
        assert!(playlist.tick().is_some());
        assert_eq!(output.played.borrow().len(), 2);
        assert!(!output.finished.get());
    }

    #[test]
    fn test_every_pick_comes_from_the_list() {
        let output = FakeOutput::default();
        let mut playlist =
            Playlist::with_rng(tracks(), Box::new(output.clone()), StdRng::seed_from_u64(3));
        for _ in 0..50 {
            output.finished.set(true);
            playlist.tick();
        }
        let list = tracks();
        assert_eq!(output.played.borrow().len(), 51);
        assert!(output.played.borrow().iter().all(|t| list.contains(t)));
    }

    #[test]
    fn test_empty_playlist_is_idle() {
        let output = FakeOutput::default();
        output.finished.set(true);
        let mut playlist =
            Playlist::with_rng(Vec::new(), Box::new(output.clone()), StdRng::seed_from_u64(4));
        assert!(playlist.tick().is_none());
        assert!(playlist.current().is_none());
        assert!(output.played.borrow().is_empty());
    }
}
