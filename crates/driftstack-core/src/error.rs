use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Empty frame stack")]
    EmptyStack,

    #[error("Frame {index} has shape {actual_h}x{actual_w}, expected {expected_h}x{expected_w}")]
    ShapeMismatch {
        index: usize,
        expected_h: usize,
        expected_w: usize,
        actual_h: usize,
        actual_w: usize,
    },

    #[error("Shift estimation failed: {0}")]
    EstimatorFailure(String),

    #[error("Non-finite values in {stage} output for frame {frame}")]
    NonFinite { stage: &'static str, frame: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DriftError>;
