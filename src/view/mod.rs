//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (formatting, grid sizing, spinner)
//! - `layout`: Screen structure and the search bar
//! - `content`: Card grid, loading skeleton and empty states
//! - `progress`: Transport bar
//! - `overlays`: Toast and help popup

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{layout::Rect, Frame};

use crate::model::{GridMetrics, GridView, TransportState, UiState};

pub use content::{NO_MATCHES, NO_SONGS};

pub struct AppView;

impl AppView {
    /// Grid dimensions for a terminal of the given size, so the model can
    /// keep the selection on screen and detect the end of the grid.
    pub fn grid_metrics(area: Rect) -> GridMetrics {
        let grid = layout::split(area).grid;
        // Block borders
        let width = grid.width.saturating_sub(2);
        let height = grid.height.saturating_sub(2);
        GridMetrics {
            columns: utils::grid_columns(width),
            visible_rows: utils::grid_rows(height),
        }
    }

    pub fn render(
        frame: &mut Frame,
        grid: &GridView,
        ui_state: &UiState,
        transport: &TransportState,
        tick: usize,
    ) {
        let areas = layout::split(frame.area());

        layout::render_search_bar(frame, areas.search, ui_state, grid);

        content::render_grid(
            frame,
            areas.grid,
            grid,
            ui_state,
            &transport.playback.state,
            tick,
        );

        progress::render_transport(frame, areas.transport, transport, tick);

        if let Some(toast) = &ui_state.toast {
            overlays::render_toast(frame, toast);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
