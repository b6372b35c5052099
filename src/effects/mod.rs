//! Visual-effect collaborators.
//!
//! None of these hold state the selection controllers depend on. Everything
//! time-based takes the current `Instant` so a frame tick drives it.

pub mod confetti;
pub mod count_up;
pub mod loader;
pub mod overlays;
pub mod particles;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod search;

pub use confetti::Confetti;
pub use count_up::CountUp;
pub use loader::PageLoader;
pub use overlays::{CloseReason, LabModal, MobileMenu, SearchOverlay};
pub use particles::{ParticleField, ParticleSettings};
pub use reveal::FadeIn;
pub use scroll::ScrollState;
pub use search::SectionIndex;
