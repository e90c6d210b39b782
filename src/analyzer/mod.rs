// Analyzer module: smoothing, lifecycle search and duration formatting.

pub mod duration;
pub mod lifecycle;
pub mod smoothing;

// Re-export the main entry points for ease of use.
pub use duration::{format_duration, format_duration_with, DurationBreakdown};
pub use lifecycle::{compute_lifecycle, compute_lifecycle_with, LifecycleAnalyzer, LifecycleOptions};
