use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::align::ShiftEstimator;
use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::{DriftError, Result};
use crate::filters::{gaussian_blur_array, scharr_magnitude_array};
use crate::fourier::shift_array;
use crate::frame::{Frame, Shift, ShiftTable};

use super::config::AlignConfig;
use super::types::{EngineStage, NoOpReporter, ProgressReporter};

/// Align a drifting stack and sum it into one frame.
///
/// Two passes: first the incremental shift of every frame relative to its
/// predecessor is estimated (on optionally prefiltered copies) and chained
/// into absolute shifts relative to frame 0; then every original frame is
/// translated by its absolute shift in the frequency domain and added into
/// the accumulator. Frame 0 is never shifted.
///
/// Errors abort the run with no partial result.
pub fn align_and_sum(
    stack: &[Frame],
    config: &AlignConfig,
    estimator: &dyn ShiftEstimator,
) -> Result<Frame> {
    align_and_sum_reported(stack, config, estimator, &NoOpReporter)
}

/// [`align_and_sum`] with progress reporting at two checkpoints per frame
/// (after its shift estimate, after its summation).
pub fn align_and_sum_reported(
    stack: &[Frame],
    config: &AlignConfig,
    estimator: &dyn ShiftEstimator,
    reporter: &dyn ProgressReporter,
) -> Result<Frame> {
    config.validate()?;
    validate_stack(stack)?;

    info!(
        frames = stack.len(),
        blur = config.blur,
        edge_filter = config.edge_filter,
        upsample = config.upsample_factor,
        "Starting stack alignment"
    );

    let table = build_shift_table(stack, config, estimator, reporter)?;
    let summed = accumulate(stack, &table, reporter)?;

    info!("Stack alignment complete");
    Ok(summed)
}

/// Run [`align_and_sum`] on a background thread and return its handle.
///
/// The engine itself stays synchronous; cancellation, if needed, is the
/// caller's concern, layered outside this wrapper.
pub fn align_and_sum_background(
    stack: Vec<Frame>,
    config: AlignConfig,
    estimator: Arc<dyn ShiftEstimator>,
) -> std::thread::JoinHandle<Result<Frame>> {
    std::thread::spawn(move || align_and_sum(&stack, &config, estimator.as_ref()))
}

fn validate_stack(stack: &[Frame]) -> Result<()> {
    let first = stack.first().ok_or(DriftError::EmptyStack)?;
    let (h, w) = first.data.dim();

    for (index, frame) in stack.iter().enumerate().skip(1) {
        let (fh, fw) = frame.data.dim();
        if fh != h || fw != w {
            return Err(DriftError::ShapeMismatch {
                index,
                expected_h: h,
                expected_w: w,
                actual_h: fh,
                actual_w: fw,
            });
        }
    }

    Ok(())
}

/// Sequential estimation pass. Each frame is filtered at most once; only
/// the previous filtered frame is kept as the pairwise reference.
fn build_shift_table(
    stack: &[Frame],
    config: &AlignConfig,
    estimator: &dyn ShiftEstimator,
    reporter: &dyn ProgressReporter,
) -> Result<ShiftTable> {
    let n = stack.len();
    let mut table = ShiftTable::with_capacity(n);
    table.push(Shift::ZERO);

    if n == 1 {
        return Ok(table);
    }

    reporter.begin_stage(EngineStage::EstimatingShifts, Some(n - 1));

    let mut prev = prefilter(&stack[0].data, 0, config)?;
    for i in 1..n {
        let cur = prefilter(&stack[i].data, i, config)?;

        let incremental =
            estimator.estimate_shift(prev.as_ref(), cur.as_ref(), config.upsample_factor)?;
        if !incremental.is_finite() {
            return Err(DriftError::EstimatorFailure(format!(
                "non-finite shift for frame {}: ({}, {})",
                i, incremental.row, incremental.col
            )));
        }

        let absolute = table[i - 1] + incremental;
        debug!(
            frame = i,
            dr = incremental.row,
            dc = incremental.col,
            abs_dr = absolute.row,
            abs_dc = absolute.col,
            "estimated shift"
        );
        table.push(absolute);

        prev = cur;
        reporter.advance(i);
    }

    reporter.finish_stage();
    Ok(table)
}

/// Filtered view of one frame for estimation. Borrows the original when no
/// filter is enabled.
fn prefilter<'a>(
    data: &'a Array2<f32>,
    index: usize,
    config: &AlignConfig,
) -> Result<Cow<'a, Array2<f32>>> {
    let filtered = match (config.blur, config.edge_filter) {
        (false, false) => return Ok(Cow::Borrowed(data)),
        (true, false) => gaussian_blur_array(data, config.blur_kernel_size),
        (false, true) => scharr_magnitude_array(data),
        (true, true) => {
            scharr_magnitude_array(&gaussian_blur_array(data, config.blur_kernel_size))
        }
    };

    if !all_finite(&filtered) {
        return Err(DriftError::NonFinite {
            stage: "filter",
            frame: index,
        });
    }

    Ok(Cow::Owned(filtered))
}

/// Summation pass. Independent per frame given the shift table, so it runs
/// on rayon with per-thread partial accumulators for larger stacks.
fn accumulate(stack: &[Frame], table: &ShiftTable, reporter: &dyn ProgressReporter) -> Result<Frame> {
    let n = stack.len();
    let (h, w) = stack[0].data.dim();

    reporter.begin_stage(EngineStage::Accumulating, Some(n));
    let counter = AtomicUsize::new(0);

    let shifted = |i: usize| -> Result<Array2<f32>> {
        let out = if table[i] == Shift::ZERO {
            stack[i].data.clone()
        } else {
            let moved = shift_array(&stack[i].data, table[i]);
            if !all_finite(&moved) {
                return Err(DriftError::NonFinite {
                    stage: "shift",
                    frame: i,
                });
            }
            moved
        };
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.advance(done);
        Ok(out)
    };

    let sum = if n >= PARALLEL_FRAME_THRESHOLD {
        (0..n)
            .into_par_iter()
            .map(shifted)
            .try_reduce(
                || Array2::<f32>::zeros((h, w)),
                |mut acc, part| {
                    acc += &part;
                    Ok(acc)
                },
            )?
    } else {
        let mut acc = Array2::<f32>::zeros((h, w));
        for i in 0..n {
            acc += &shifted(i)?;
        }
        acc
    };

    reporter.finish_stage();
    Ok(Frame::new(sum))
}

fn all_finite(data: &Array2<f32>) -> bool {
    data.iter().all(|v| v.is_finite())
}
