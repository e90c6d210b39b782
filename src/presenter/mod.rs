// Presenter: joins analysis with retail metadata and renders it as text.

pub mod assembler;
pub mod render;

pub use assembler::{AnalysisRequest, Assembler, InvalidRequest, LifecycleReport, ProductReport};
pub use render::{rating_to_stars, sparkline, Renderer};
