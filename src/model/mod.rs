//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `track`: The catalog track record and its wire form
//! - `search`: Client-side search filter
//! - `catalog`: Accumulated pages and infinite-scroll bookkeeping
//! - `types`: Core UI type definitions (focus, toasts, grid metrics)
//! - `playback`: Transport bar state (snapshot, volume, mute)
//! - `app_model`: Main application model with state management methods

pub(crate) mod track;
pub mod search;
mod catalog;
mod types;
mod playback;
mod app_model;

// Re-export all public types for convenient access
pub use track::Track;

pub use catalog::{CatalogPage, CatalogState};

pub use types::{Focus, GridMetrics, Toast, ToastKind, UiState};

pub use playback::{TransportState, VolumeControl};

pub use app_model::{AppModel, GridView, SelectionMove};
