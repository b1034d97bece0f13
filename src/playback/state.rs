//! Playback state owned by the engine

use crate::model::Track;

/// Where the engine is in its play/pause lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No current track.
    #[default]
    Idle,
    /// A source is being downloaded and decoded.
    Loading,
    Playing,
    Paused,
}

/// The single source of truth for the transport UI.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    pub current: Option<Track>,
    pub phase: PlaybackPhase,
    pub shuffle: bool,
    pub looping: bool,
    /// Output level in `[0, 1]`, independent of any mute toggle.
    pub volume: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: None,
            phase: PlaybackPhase::Idle,
            shuffle: false,
            looping: false,
            volume: 1.0,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.phase == PlaybackPhase::Loading
    }

    pub fn is_current(&self, track: &Track) -> bool {
        self.current.as_ref().is_some_and(|c| c.is_same(track))
    }
}

/// Read-only copy of the engine state plus the output readout, handed to the
/// presentation layer.
#[derive(Clone, Debug, Default)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub position_secs: f64,
    pub duration_secs: f64,
}
