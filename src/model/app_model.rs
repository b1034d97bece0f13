//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::catalog::{CatalogPage, CatalogState};
use super::playback::TransportState;
use super::search;
use super::track::Track;
use super::types::{Focus, GridMetrics, Toast, ToastKind, UiState};
use crate::config::{TOAST_LIFETIME, TRACK_CHANGE_DEBOUNCE};
use crate::playback::PlaybackSnapshot;

/// Direction for grid selection moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMove {
    Left,
    Right,
    Up,
    Down,
}

/// What the grid needs for one frame
#[derive(Clone, Debug, Default)]
pub struct GridView {
    /// Tracks after the search filter, in catalog order
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub grid: GridMetrics,
    pub initial_loading: bool,
    pub loading_more: bool,
    pub searching: bool,
}

/// Main application model containing all state.
///
/// Locks are always taken catalog first, then UI state.
pub struct AppModel {
    catalog: Arc<Mutex<CatalogState>>,
    pub ui_state: Arc<Mutex<UiState>>,
    transport: Arc<Mutex<TransportState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(Mutex::new(CatalogState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            transport: Arc::new(Mutex::new(TransportState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn begin_next_page(&self) -> Option<u32> {
        self.catalog.lock().await.begin_next_page()
    }

    /// Returns the appended tracks, or `None` for a stale page.
    pub async fn apply_page(&self, page: CatalogPage) -> Option<Vec<Track>> {
        let mut catalog = self.catalog.lock().await;
        catalog.apply_page(page).map(<[Track]>::to_vec)
    }

    pub async fn catalog_len(&self) -> usize {
        self.catalog.lock().await.tracks.len()
    }

    // ========================================================================
    // Grid
    // ========================================================================

    pub async fn grid_view(&self) -> GridView {
        let catalog = self.catalog.lock().await;
        let ui = self.ui_state.lock().await;

        let tracks: Vec<Track> = search::filter(&catalog.tracks, &ui.search_query)
            .into_iter()
            .cloned()
            .collect();
        let selected = ui.selected.min(tracks.len().saturating_sub(1));

        GridView {
            selected,
            grid: ui.grid,
            initial_loading: catalog.is_initial_load(),
            loading_more: catalog.is_loading() && !catalog.tracks.is_empty(),
            searching: ui.is_searching(),
            tracks,
        }
    }

    pub async fn set_grid_metrics(&self, grid: GridMetrics) {
        self.ui_state.lock().await.grid = grid;
    }

    pub async fn move_selection(&self, direction: SelectionMove) {
        let catalog = self.catalog.lock().await;
        let mut ui = self.ui_state.lock().await;

        let len = search::filter(&catalog.tracks, &ui.search_query).len();
        if len == 0 {
            ui.selected = 0;
            return;
        }
        let last = len - 1;
        let columns = ui.grid.columns.max(1);
        let current = ui.selected.min(last);

        ui.selected = match direction {
            SelectionMove::Left => current.saturating_sub(1),
            SelectionMove::Right => (current + 1).min(last),
            SelectionMove::Up => current.checked_sub(columns).unwrap_or(current),
            SelectionMove::Down => (current + columns).min(last),
        };
    }

    pub async fn selected_track(&self) -> Option<Track> {
        let catalog = self.catalog.lock().await;
        let ui = self.ui_state.lock().await;
        let filtered = search::filter(&catalog.tracks, &ui.search_query);
        let selected = ui.selected.min(filtered.len().saturating_sub(1));
        filtered.get(selected).map(|t| (*t).clone())
    }

    /// Whether scrolling has reached the end of what is loaded and another
    /// page should be requested. Never while a search is active.
    pub async fn should_load_more(&self) -> bool {
        let catalog = self.catalog.lock().await;
        if !catalog.has_more || catalog.is_loading() {
            return false;
        }

        let ui = self.ui_state.lock().await;
        if ui.is_searching() {
            return false;
        }

        let len = catalog.tracks.len();
        if len == 0 {
            return true;
        }
        let selected = ui.selected.min(len - 1);
        ui.grid.is_visible(selected, len - 1)
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub async fn set_focus(&self, focus: Focus) {
        self.ui_state.lock().await.focus = focus;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
        state.selected = 0;
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
        state.selected = 0;
    }

    pub async fn clear_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.clear();
        state.selected = 0;
    }

    // ========================================================================
    // Toasts & popups
    // ========================================================================

    pub async fn show_toast(&self, kind: ToastKind, message: impl Into<String>) {
        self.ui_state.lock().await.toast = Some(Toast::new(kind, message));
    }

    pub async fn auto_clear_old_toasts(&self) {
        let mut state = self.ui_state.lock().await;
        if state
            .toast
            .as_ref()
            .is_some_and(|t| t.is_expired(TOAST_LIFETIME))
        {
            state.toast = None;
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Transport
    // ========================================================================

    pub async fn get_transport(&self) -> TransportState {
        self.transport.lock().await.clone()
    }

    pub async fn update_playback(&self, snapshot: PlaybackSnapshot) {
        self.transport.lock().await.playback = snapshot;
    }

    /// Returns the level to hand to the engine.
    pub async fn step_volume(&self, delta: f32) -> f32 {
        self.transport.lock().await.volume.step(delta)
    }

    pub async fn toggle_mute(&self) -> f32 {
        self.transport.lock().await.volume.toggle_mute()
    }

    pub async fn begin_track_change(&self) {
        self.transport.lock().await.changing_track_until =
            Some(Instant::now() + TRACK_CHANGE_DEBOUNCE);
    }

    pub async fn is_changing_track(&self) -> bool {
        self.transport.lock().await.is_changing_track()
    }
}
