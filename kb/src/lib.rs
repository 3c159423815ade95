//! Kanboard - three-column task board for the terminal
//!
//! Cards live in a single JSON snapshot managed by [`boardstore`]. This crate
//! adds the user-facing surfaces on top of it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration types and loading
//! - [`render`] - Plain-text board output for `kb show`
//! - [`tui`] - Interactive board with drag-and-drop

pub mod cli;
pub mod config;
pub mod render;
pub mod tui;
