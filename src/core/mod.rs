//! Core page logic layer
//!
//! Selection groups, the reviews carousel and the page controller factory.
//! NO imports from frontend/ or rendering code.
//! Frontends feed input into `AppCore`, then read it back to render.

pub mod actions;
pub mod app_core;
pub mod carousel;
pub mod dosage;
pub mod faq;
pub mod layout;
pub mod page;
pub mod selection;
pub mod tabs;
pub mod variants;

pub use app_core::{AppCore, Click, FocusTarget, HitTarget};
pub use page::PageControllers;
