pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{align_and_sum, align_and_sum_background, align_and_sum_reported};
pub use types::{EngineStage, ProgressReporter};
