//! Playback - the engine that owns the single audio output
//!
//! - `state`: phase, flags and the snapshot handed to the UI
//! - `playlist`: append-only track list and index arithmetic
//! - `engine`: synchronous state machine around the output
//!
//! `Player` is the cloneable async handle the controller talks to.

mod engine;
mod playlist;
mod state;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use engine::{PlayStep, PlaybackEngine};
pub use playlist::Playlist;
pub use state::{PlaybackPhase, PlaybackSnapshot, PlaybackState};

use crate::audio::{AudioOutput, SourceLoader};
use crate::error::PlaybackError;
use crate::model::Track;

#[derive(Clone)]
pub struct Player {
    engine: Arc<Mutex<PlaybackEngine>>,
    loader: Arc<dyn SourceLoader>,
}

impl Player {
    pub fn new(output: Box<dyn AudioOutput>, loader: Arc<dyn SourceLoader>) -> Self {
        Self::with_engine(PlaybackEngine::new(output), loader)
    }

    pub fn with_engine(engine: PlaybackEngine, loader: Arc<dyn SourceLoader>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            loader,
        }
    }

    /// Play `track`, switching sources when it is not the current one.
    ///
    /// Failures are logged here; an `Interrupted` result only means a newer
    /// request won and is logged at debug level.
    pub async fn play(&self, track: &Track) -> Result<(), PlaybackError> {
        let step = self.engine.lock().await.begin_play(track);
        let PlayStep::Load { generation, url } = step else {
            return Ok(());
        };

        let fetched = self.loader.fetch(url).await;
        let outcome = self.engine.lock().await.finish_play(generation, fetched);

        match &outcome {
            Ok(()) => tracing::info!(
                track_id = %track.id,
                track = %track.name,
                artist = %track.artist_name,
                "Playback started"
            ),
            Err(e) if e.is_interrupted() => {
                tracing::debug!(track_id = %track.id, "Play interrupted by a newer request")
            }
            Err(e) => tracing::error!(track_id = %track.id, error = %e, "Error playing audio"),
        }
        outcome
    }

    pub async fn pause(&self) {
        self.engine.lock().await.pause();
    }

    pub async fn next(&self) -> Result<(), PlaybackError> {
        let target = self.engine.lock().await.next_target();
        match target {
            Some(track) => self.play(&track).await,
            None => Ok(()),
        }
    }

    pub async fn previous(&self) -> Result<(), PlaybackError> {
        let target = self.engine.lock().await.previous_target();
        match target {
            Some(track) => self.play(&track).await,
            None => Ok(()),
        }
    }

    pub async fn seek(&self, seconds: f64) {
        if let Err(e) = self.engine.lock().await.seek(seconds) {
            tracing::warn!(seconds, error = %e, "Seek failed");
        }
    }

    /// Seek relative to the current position.
    pub async fn seek_by(&self, delta_secs: f64) {
        let mut engine = self.engine.lock().await;
        let target = engine.position_secs() + delta_secs;
        if let Err(e) = engine.seek(target) {
            tracing::warn!(target, error = %e, "Seek failed");
        }
    }

    pub async fn set_volume(&self, level: f32) {
        self.engine.lock().await.set_volume(level);
    }

    pub async fn toggle_shuffle(&self) -> bool {
        self.engine.lock().await.toggle_shuffle()
    }

    pub async fn toggle_loop(&self) -> bool {
        self.engine.lock().await.toggle_loop()
    }

    pub async fn extend_playlist(&self, tracks: Vec<Track>) {
        self.engine.lock().await.extend_playlist(tracks);
    }

    pub async fn snapshot(&self) -> PlaybackSnapshot {
        self.engine.lock().await.snapshot()
    }

    /// Advance when the playing source has ended. Returns whether it had;
    /// each end is reported once.
    pub async fn advance_if_finished(&self) -> bool {
        let target = {
            let mut engine = self.engine.lock().await;
            if !engine.take_finished() {
                return false;
            }
            let target = engine.next_target();
            if target.is_none() {
                engine.settle_after_end();
            }
            target
        };

        match target {
            Some(track) => {
                tracing::debug!(track_id = %track.id, "Track ended, advancing");
                let _ = self.play(&track).await;
            }
            None => tracing::debug!("Track ended, nothing to advance to"),
        }
        true
    }

    pub async fn shutdown(&self) {
        self.engine.lock().await.shutdown();
    }
}
