//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
mod chrome;
mod effects_view;
mod hit_map;
mod overlays;
mod page_view;
mod palette;

pub use app::TuiFrontend;
