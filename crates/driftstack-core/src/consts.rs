/// Minimum frame count to use frame-level Rayon parallelism in the
/// accumulation pass.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Gaussian blur standard deviation used for registration preprocessing.
/// The kernel size is configurable; sigma is not.
pub const BLUR_SIGMA: f32 = 3.0;

/// Default Gaussian blur kernel size in pixels. Must be odd.
pub const DEFAULT_BLUR_KERNEL_SIZE: usize = 7;

/// Default upsampling factor for sub-pixel shift estimation.
/// 100 gives 1/100-pixel precision.
pub const DEFAULT_UPSAMPLE_FACTOR: usize = 100;

/// Search window (in pixels) around the coarse correlation peak for the
/// upsampled DFT refinement.
pub const UPSAMPLED_SEARCH_WINDOW: f64 = 1.5;

/// Magnitude floor below which cross-power spectrum bins are zeroed
/// instead of normalized.
pub const CROSS_POWER_EPSILON: f64 = 1e-12;
