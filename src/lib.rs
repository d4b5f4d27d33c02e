// VibeGuard Dashboard Library

pub mod config;
pub mod common;
pub mod core;
pub mod api;
pub mod mocks;
pub mod headless;
pub mod tui;

// Core types
pub mod types;
pub mod constants;

// Re-exports for convenience
pub use config::Config;
pub use api::{HttpMetricsClient, MetricsSource};
pub use mocks::MockMetricsSource;
pub use crate::core::{DashboardStore, FetchDisposition, MetricAnimator, ParticleField, PollEvent, Poller, PollerHandle};

// Re-export common types
pub use common::formatting::*;
pub use common::time::*;
pub use common::validation::*;
pub use types::{DashboardError, DashboardResult, MetricsSnapshot};
