//! Synchronous playback state machine around the single audio output.
//!
//! Loading a new source is split in two halves so the engine lock is never
//! held across the download: `begin_play` decides what to do and
//! `finish_play` applies the downloaded bytes. Every play/pause bumps
//! `generation`; a load that finishes under an older generation has been
//! superseded and is reported as `PlaybackError::Interrupted`.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::AudioOutput;
use crate::error::PlaybackError;
use crate::model::Track;

use super::playlist::Playlist;
use super::state::{PlaybackPhase, PlaybackSnapshot, PlaybackState};

/// What `begin_play` decided.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayStep {
    /// The current source was resumed in place.
    Resumed,
    /// A new source must be fetched and handed to `finish_play`.
    Load { generation: u64, url: String },
}

pub struct PlaybackEngine {
    output: Box<dyn AudioOutput>,
    state: PlaybackState,
    playlist: Playlist,
    generation: u64,
    /// Generation whose end of track has already been acted on.
    ended: Option<u64>,
    rng: StdRng,
}

impl PlaybackEngine {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self::with_rng(output, StdRng::from_os_rng())
    }

    pub fn with_rng(output: Box<dyn AudioOutput>, rng: StdRng) -> Self {
        Self {
            output,
            state: PlaybackState::default(),
            playlist: Playlist::default(),
            generation: 0,
            ended: None,
            rng,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn begin_play(&mut self, track: &Track) -> PlayStep {
        self.generation += 1;

        if self.state.is_current(track) && self.output.has_source() {
            self.output.play();
            self.state.phase = PlaybackPhase::Playing;
            tracing::debug!(track_id = %track.id, "Resuming current track");
            return PlayStep::Resumed;
        }

        tracing::debug!(
            track_id = %track.id,
            generation = self.generation,
            "Switching source"
        );
        self.output.stop();
        self.state.current = Some(track.clone());
        self.state.phase = PlaybackPhase::Loading;
        PlayStep::Load {
            generation: self.generation,
            url: track.audio.clone(),
        }
    }

    pub fn finish_play(
        &mut self,
        generation: u64,
        fetched: Result<Vec<u8>, PlaybackError>,
    ) -> Result<(), PlaybackError> {
        if generation != self.generation {
            return Err(PlaybackError::Interrupted);
        }

        let loaded = fetched.and_then(|data| self.output.load(data));
        match loaded {
            Ok(()) => {
                self.output.set_volume(self.state.volume);
                self.output.play();
                self.state.phase = PlaybackPhase::Playing;
                Ok(())
            }
            Err(e) => {
                self.state.phase = PlaybackPhase::Paused;
                Err(e)
            }
        }
    }

    /// Safe in any phase; does nothing when nothing is playing or loading.
    pub fn pause(&mut self) {
        match self.state.phase {
            PlaybackPhase::Playing | PlaybackPhase::Loading => {
                self.generation += 1;
                self.output.pause();
                self.state.phase = PlaybackPhase::Paused;
            }
            PlaybackPhase::Idle | PlaybackPhase::Paused => {}
        }
    }

    /// Track that `next()` should play, if any.
    pub fn next_target(&mut self) -> Option<Track> {
        let current = self.state.current.clone()?;
        if self.playlist.is_empty() {
            return None;
        }
        if self.state.looping {
            return Some(current);
        }

        let current_index = self.playlist.index_of(&current);
        let next = self
            .playlist
            .next_index(current_index, self.state.shuffle, &mut self.rng)?;
        if Some(next) == current_index {
            return None;
        }
        self.playlist.get(next).cloned()
    }

    /// Track that `previous()` should play, if any.
    pub fn previous_target(&mut self) -> Option<Track> {
        let current = self.state.current.as_ref()?;
        let current_index = self.playlist.index_of(current);
        let previous = self
            .playlist
            .previous_index(current_index, self.state.shuffle, &mut self.rng)?;
        self.playlist.get(previous).cloned()
    }

    /// Jump to `seconds`, clamped to the track bounds. Ignored without a source.
    pub fn seek(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        if !self.output.has_source() {
            tracing::debug!(seconds, "Seek ignored, no track loaded");
            return Ok(());
        }
        let upper = self.duration_secs();
        let target = if upper > 0.0 {
            seconds.clamp(0.0, upper)
        } else {
            seconds.max(0.0)
        };
        if !target.is_finite() {
            return Ok(());
        }
        self.output.seek(Duration::from_secs_f64(target))
    }

    pub fn set_volume(&mut self, level: f32) {
        let level = if level.is_finite() { level.clamp(0.0, 1.0) } else { 0.0 };
        self.state.volume = level;
        self.output.set_volume(level);
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.state.shuffle = !self.state.shuffle;
        self.state.shuffle
    }

    pub fn toggle_loop(&mut self) -> bool {
        self.state.looping = !self.state.looping;
        self.state.looping
    }

    pub fn extend_playlist(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.playlist.extend(tracks);
    }

    pub fn position_secs(&self) -> f64 {
        self.output.position().as_secs_f64()
    }

    /// Decoder-reported length, falling back to the catalog duration.
    pub fn duration_secs(&self) -> f64 {
        if let Some(duration) = self.output.duration() {
            return duration.as_secs_f64();
        }
        self.state
            .current
            .as_ref()
            .map(|t| f64::from(t.duration))
            .unwrap_or(0.0)
    }

    /// True once a playing source has run to its end and nobody has taken
    /// that end yet.
    pub fn track_finished(&self) -> bool {
        self.state.phase == PlaybackPhase::Playing
            && self.output.is_finished()
            && self.ended != Some(self.generation)
    }

    /// Claim the end of the current source. Reports each end exactly once;
    /// the next play or resume arms it again.
    pub fn take_finished(&mut self) -> bool {
        if !self.track_finished() {
            return false;
        }
        self.ended = Some(self.generation);
        true
    }

    /// The source ended with nothing to move on to. Resuming replays it.
    pub fn settle_after_end(&mut self) {
        if self.state.phase == PlaybackPhase::Playing {
            self.state.phase = PlaybackPhase::Paused;
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state.clone(),
            position_secs: self.position_secs(),
            duration_secs: self.duration_secs(),
        }
    }

    pub fn shutdown(&mut self) {
        self.generation += 1;
        self.output.stop();
    }
}
