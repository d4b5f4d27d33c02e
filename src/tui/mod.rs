//! VibeGuard TUI Dashboard
//!
//! Terminal rendition of the VibeGuard analytics page: animated counters,
//! scan growth chart, recent scans, CTA notice and a particle backdrop.
//!
//! # Architecture
//!
//! - [`app`] - Application state, mount/unmount lifecycle and the event loop
//! - [`ui`] - Layout rendering
//! - [`widgets`] - Reusable widget components

pub mod app;
pub mod ui;
pub mod widgets;

pub use app::{run, App, AppAction};
