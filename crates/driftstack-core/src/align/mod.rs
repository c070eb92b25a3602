pub mod upsampled_dft;

pub use upsampled_dft::UpsampledDftEstimator;

use ndarray::Array2;

use crate::error::Result;
use crate::frame::Shift;

/// Sub-pixel translation estimation between two same-shape images.
///
/// `estimate_shift` returns the shift that, applied to `target` through the
/// frequency-domain shift operator, best aligns it with `reference`,
/// accurate to `1/upsample` pixel. Implementations must be deterministic for
/// identical inputs.
///
/// The engine consumes this as an injected capability so callers can swap
/// the algorithm or stub it out in tests. Returned shifts are authoritative:
/// the engine never retries or second-guesses them.
pub trait ShiftEstimator: Send + Sync {
    fn estimate_shift(
        &self,
        reference: &Array2<f32>,
        target: &Array2<f32>,
        upsample: usize,
    ) -> Result<Shift>;
}
