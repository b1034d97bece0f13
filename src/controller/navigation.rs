//! Catalog paging and the transport poller

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::PROGRESS_POLL_INTERVAL;
use super::AppController;

impl AppController {
    /// Request the next catalog page when the grid has scrolled to its end.
    /// The fetch runs in the background.
    pub async fn maybe_load_more(&self) {
        if !self.model.should_load_more().await {
            return;
        }
        let Some(page) = self.model.begin_next_page().await else {
            return;
        };

        let controller = self.clone();
        tokio::spawn(async move {
            controller.load_page(page).await;
        });
    }

    /// Fetch the next page in the foreground. Returns whether one was added.
    pub async fn load_next_page(&self) -> bool {
        match self.model.begin_next_page().await {
            Some(page) => self.load_page(page).await,
            None => false,
        }
    }

    async fn load_page(&self, page: u32) -> bool {
        tracing::debug!(page, "Requesting catalog page");
        let result = self.pages.fetch_page(page).await;

        match self.model.apply_page(result).await {
            Some(tracks) => {
                tracing::debug!(page, added = tracks.len(), "Catalog page applied");
                self.player.extend_playlist(tracks).await;
                true
            }
            None => false,
        }
    }

    /// Poll the player at a fixed rate: advance past finished tracks and
    /// refresh the transport bar.
    pub fn start_progress_poller(&self) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(PROGRESS_POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if controller.model.should_quit().await {
                    break;
                }
                controller.player.advance_if_finished().await;
                controller.sync_transport().await;
            }
            tracing::debug!("Progress poller stopped");
        })
    }
}
