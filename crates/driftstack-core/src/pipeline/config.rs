use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLUR_KERNEL_SIZE, DEFAULT_UPSAMPLE_FACTOR};
use crate::error::{DriftError, Result};

/// Immutable per-run settings for one alignment run.
///
/// Preprocessing only affects what the shift estimator sees; the summed
/// output is always built from the original frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Gaussian-blur both images of each registration pair before
    /// estimating their shift.
    #[serde(default = "default_blur")]
    pub blur: bool,

    /// Blur kernel size in pixels. Must be odd.
    #[serde(default = "default_blur_kernel_size")]
    pub blur_kernel_size: usize,

    /// Apply the Scharr edge filter before estimation (after the blur when
    /// both are enabled). Helps when intensity varies across the stack.
    #[serde(default)]
    pub edge_filter: bool,

    /// Sub-pixel precision denominator: 100 registers to 1/100 pixel.
    #[serde(default = "default_upsample_factor")]
    pub upsample_factor: usize,
}

fn default_blur() -> bool {
    true
}

fn default_blur_kernel_size() -> usize {
    DEFAULT_BLUR_KERNEL_SIZE
}

fn default_upsample_factor() -> usize {
    DEFAULT_UPSAMPLE_FACTOR
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            blur: true,
            blur_kernel_size: DEFAULT_BLUR_KERNEL_SIZE,
            edge_filter: false,
            upsample_factor: DEFAULT_UPSAMPLE_FACTOR,
        }
    }
}

impl AlignConfig {
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(DriftError::InvalidConfig(format!(
                "blur kernel size must be odd, got {}",
                self.blur_kernel_size
            )));
        }
        if self.upsample_factor == 0 {
            return Err(DriftError::InvalidConfig(
                "upsample factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
