pub mod client;

pub use client::{HttpMetricsClient, MetricsSource};
