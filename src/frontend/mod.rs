//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
use std::time::Instant;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from page logic. The frontend reads
/// `AppCore` to draw and translates native input into `FrontendEvent`s.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize, paste) converted
    /// to the frontend-agnostic `FrontendEvent` enum. An empty list means
    /// the poll timed out.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current page state
    ///
    /// Called once per frame. Mutable access lets the frontend report the
    /// size it actually drew at.
    fn render(&mut self, core: &mut AppCore, now: Instant) -> Result<()>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in cells, `(width, height)`
    fn size(&self) -> (u16, u16);
}
