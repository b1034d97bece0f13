//! Transport bar state: the engine snapshot plus UI-only volume handling

use std::time::Instant;

use crate::playback::PlaybackSnapshot;

/// Slider level and mute toggle. The engine only ever sees the effective
/// output level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeControl {
    level: f32,
    muted: bool,
    last_audible: f32,
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self {
            level: 1.0,
            muted: false,
            last_audible: 1.0,
        }
    }
}

impl VolumeControl {
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the output should use right now.
    pub fn output_level(&self) -> f32 {
        if self.muted { 0.0 } else { self.level }
    }

    pub fn percent(&self) -> u8 {
        (self.output_level() * 100.0).round() as u8
    }

    /// Move the slider. Dropping it to zero mutes.
    pub fn set_level(&mut self, level: f32) -> f32 {
        let level = if level.is_finite() { level.clamp(0.0, 1.0) } else { 0.0 };
        self.level = level;
        self.muted = level == 0.0;
        if level > 0.0 {
            self.last_audible = level;
        }
        self.output_level()
    }

    /// Nudge the slider from where it currently shows.
    pub fn step(&mut self, delta: f32) -> f32 {
        let from = self.output_level();
        self.set_level(from + delta)
    }

    /// Unmuting restores the last non-zero level.
    pub fn toggle_mute(&mut self) -> f32 {
        if self.muted {
            self.muted = false;
            if self.level == 0.0 {
                self.level = self.last_audible;
            }
        } else {
            self.muted = true;
        }
        self.output_level()
    }
}

/// Everything the transport bar renders
#[derive(Clone, Debug, Default)]
pub struct TransportState {
    pub playback: PlaybackSnapshot,
    pub volume: VolumeControl,
    /// Set right after next/previous; play/pause is ignored until then.
    pub changing_track_until: Option<Instant>,
}

impl TransportState {
    pub fn is_changing_track(&self) -> bool {
        self.changing_track_until
            .is_some_and(|until| Instant::now() < until)
    }

    /// Spinner instead of the play/pause marker.
    pub fn is_busy(&self) -> bool {
        self.playback.state.is_loading() || self.is_changing_track()
    }
}
