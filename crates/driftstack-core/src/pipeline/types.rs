/// Engine stage, used for progress reporting.
///
/// One alignment run moves through `EstimatingShifts` (frames 1..N-1,
/// strictly in order) and then `Accumulating` (all frames, any order).
#[derive(Clone, Copy, Debug)]
pub enum EngineStage {
    EstimatingShifts,
    Accumulating,
}

impl std::fmt::Display for EngineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EstimatingShifts => write!(f, "Estimating shifts"),
            Self::Accumulating => write!(f, "Summing frames"),
        }
    }
}

/// Thread-safe progress reporting for one alignment run.
///
/// Progress is a side channel: implementations must not influence results.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// (frame count) in this stage, if known.
    fn begin_stage(&self, _stage: EngineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `align_and_sum` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
