//! Playback control methods

use crate::config::{SEEK_STEP_SECS, VOLUME_STEP};
use crate::model::{ToastKind, Track};
use crate::share::toast_preview;

use super::AppController;

const SHARE_PREVIEW_CHARS: usize = 40;

impl AppController {
    /// Play `track` in the background; downloads can take a while.
    pub fn spawn_play(&self, track: Track) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.play_track(&track).await;
        });
    }

    pub async fn play_track(&self, track: &Track) {
        let play = self.player.play(track);
        // Show the spinner while the source downloads
        let (result, ()) = tokio::join!(play, self.sync_transport());
        if let Err(e) = result {
            if !e.is_interrupted() {
                self.model
                    .show_toast(ToastKind::Error, format!("Could not play \"{}\"", track.name))
                    .await;
            }
        }
        self.sync_transport().await;
    }

    /// Enter on a card: pause it when it is the playing track, else play it.
    pub async fn activate_selected(&self) {
        let Some(track) = self.model.selected_track().await else {
            return;
        };
        let snapshot = self.player.snapshot().await;
        if snapshot.state.is_current(&track) && snapshot.state.is_playing() {
            self.player.pause().await;
            self.sync_transport().await;
        } else {
            self.spawn_play(track);
        }
    }

    /// Space: pause or resume the current track. With nothing current the
    /// selected card starts instead.
    pub async fn toggle_playback(&self) {
        if self.model.is_changing_track().await {
            tracing::debug!("Ignoring play/pause while changing track");
            return;
        }

        let state = self.player.snapshot().await.state;
        tracing::debug!(phase = ?state.phase, "Toggling playback");
        if state.is_playing() || state.is_loading() {
            self.player.pause().await;
            self.sync_transport().await;
            return;
        }

        let target = match state.current {
            Some(track) => Some(track),
            None => self.model.selected_track().await,
        };
        if let Some(track) = target {
            self.spawn_play(track);
        }
    }

    pub async fn next_track(&self) {
        self.model.begin_track_change().await;
        let controller = self.clone();
        tokio::spawn(async move {
            if controller.player.next().await.is_ok() {
                tracing::info!("Skipped to next track");
            }
            controller.sync_transport().await;
        });
    }

    pub async fn previous_track(&self) {
        self.model.begin_track_change().await;
        let controller = self.clone();
        tokio::spawn(async move {
            if controller.player.previous().await.is_ok() {
                tracing::info!("Went back to previous track");
            }
            controller.sync_transport().await;
        });
    }

    pub async fn toggle_shuffle(&self) {
        let shuffle = self.player.toggle_shuffle().await;
        let message = if shuffle { "Shuffle on" } else { "Shuffle off" };
        self.model.show_toast(ToastKind::Info, message).await;
        self.sync_transport().await;
    }

    pub async fn toggle_loop(&self) {
        let looping = self.player.toggle_loop().await;
        let message = if looping { "Repeat on" } else { "Repeat off" };
        self.model.show_toast(ToastKind::Info, message).await;
        self.sync_transport().await;
    }

    pub async fn volume_up(&self) {
        let level = self.model.step_volume(VOLUME_STEP).await;
        self.player.set_volume(level).await;
        self.sync_transport().await;
    }

    pub async fn volume_down(&self) {
        let level = self.model.step_volume(-VOLUME_STEP).await;
        self.player.set_volume(level).await;
        self.sync_transport().await;
    }

    pub async fn toggle_mute(&self) {
        let level = self.model.toggle_mute().await;
        self.player.set_volume(level).await;
        self.sync_transport().await;
    }

    pub async fn seek_forward(&self) {
        self.player.seek_by(SEEK_STEP_SECS).await;
        self.sync_transport().await;
    }

    pub async fn seek_backward(&self) {
        self.player.seek_by(-SEEK_STEP_SECS).await;
        self.sync_transport().await;
    }

    /// Copy the share link of the current track, or of the selected card
    /// when nothing is current.
    pub async fn share(&self) {
        let current = self.player.snapshot().await.state.current;
        let track = match current {
            Some(track) => Some(track),
            None => self.model.selected_track().await,
        };
        let Some(track) = track else {
            self.model.show_toast(ToastKind::Info, "Nothing to share").await;
            return;
        };
        if track.shareurl.is_empty() {
            self.model
                .show_toast(ToastKind::Error, "This track has no share link")
                .await;
            return;
        }

        match self.clipboard.copy_text(&track.shareurl) {
            Ok(()) => {
                tracing::info!(track_id = %track.id, "Share link copied");
                let preview = toast_preview(&track.shareurl, SHARE_PREVIEW_CHARS);
                self.model
                    .show_toast(ToastKind::Success, format!("Link copied: {preview}"))
                    .await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard error");
                self.model
                    .show_toast(ToastKind::Error, format!("Could not copy link: {e}"))
                    .await;
            }
        }
    }
}
