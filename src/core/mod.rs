pub mod animator;
pub mod frame;
pub mod particles;
pub mod poller;
pub mod store;

pub use animator::{AnimationDurations, DisplayedMetrics, MetricAnimator, Tween};
pub use frame::FrameTicker;
pub use particles::{Particle, ParticleField};
pub use poller::{PollEvent, Poller, PollerHandle};
pub use store::{DashboardStore, FetchDisposition};
