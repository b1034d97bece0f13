//! Core UI type definitions

use std::time::{Duration, Instant};

/// Which part of the screen receives key presses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Grid,
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// A transient notification shown over the grid
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, lifetime: Duration) -> bool {
        self.created.elapsed() >= lifetime
    }
}

/// Card grid dimensions as last laid out by the view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridMetrics {
    pub columns: usize,
    pub visible_rows: usize,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            columns: 1,
            visible_rows: 1,
        }
    }
}

impl GridMetrics {
    /// First row drawn so that the selected card stays on screen.
    pub fn first_visible_row(&self, selected: usize) -> usize {
        let selected_row = selected / self.columns.max(1);
        selected_row.saturating_sub(self.visible_rows.max(1) - 1)
    }

    /// Whether the card at `index` is drawn given the current selection.
    pub fn is_visible(&self, selected: usize, index: usize) -> bool {
        let first = self.first_visible_row(selected);
        let row = index / self.columns.max(1);
        row >= first && row < first + self.visible_rows.max(1)
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub focus: Focus,
    pub search_query: String,
    /// Index into the filtered track list
    pub selected: usize,
    pub grid: GridMetrics,
    pub toast: Option<Toast>,
    pub show_help_popup: bool,
}

impl UiState {
    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }
}
