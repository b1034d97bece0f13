//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the player.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Transport controls and sharing
//! - `navigation`: Catalog paging and the progress poller

mod input;
mod navigation;
mod playback;

use std::sync::Arc;

use crate::catalog::PageSource;
use crate::model::AppModel;
use crate::playback::Player;
use crate::share::Clipboard;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) player: Player,
    pages: Arc<dyn PageSource>,
    clipboard: Arc<dyn Clipboard>,
}

impl AppController {
    pub fn new(
        model: Arc<AppModel>,
        player: Player,
        pages: Arc<dyn PageSource>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            model,
            player,
            pages,
            clipboard,
        }
    }

    pub fn model(&self) -> &Arc<AppModel> {
        &self.model
    }

    /// Copy the engine's current state into the transport bar.
    pub(crate) async fn sync_transport(&self) {
        let snapshot = self.player.snapshot().await;
        self.model.update_playback(snapshot).await;
    }
}
