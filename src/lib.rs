//! Terminal music discovery for the Jamendo catalog.
//!
//! The crate follows a model/view/controller split: `model` holds state,
//! `view` draws it with ratatui, and `controller` turns key presses into
//! catalog requests and player commands. `playback` owns the single audio
//! output.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod playback;
pub mod share;
pub mod view;
