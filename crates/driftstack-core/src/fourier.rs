//! Frequency-domain shift operator.
//!
//! Translates an image by an arbitrary real-valued (row, col) offset by
//! multiplying its 2-D Fourier transform with a linear phase ramp and
//! inverse-transforming. Boundaries wrap around, and the operation is exact
//! for sub-pixel offsets: shifting by (0,0) is the identity and shifting by
//! S1 then S2 equals shifting by S1+S2, up to floating-point error.
//!
//! The FFT helpers here are deliberately sequential: frame-level parallelism
//! lives in the accumulation pass, which calls this operator from inside a
//! rayon pool.

use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;
use std::f64::consts::TAU;

use crate::frame::{Frame, Shift};

/// 2D forward FFT: row-wise, then column-wise.
pub fn fft2d_forward(data: &Array2<f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut work = data.mapv(|v| Complex::new(v as f64, 0.0));

    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| work[[row, c]]).collect();
        fft_row.process(&mut row_data);
        for (col, val) in row_data.into_iter().enumerate() {
            work[[row, col]] = val;
        }
    }

    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| work[[r, col]]).collect();
        fft_col.process(&mut col_data);
        for (row, val) in col_data.into_iter().enumerate() {
            work[[row, col]] = val;
        }
    }

    work
}

/// 2D inverse FFT, returning the real part normalized by `1/(h*w)`.
pub fn ifft2d_real(data: &Array2<Complex<f64>>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();

    for col in 0..w {
        let mut col_data: Vec<Complex<f64>> = (0..h).map(|r| work[[r, col]]).collect();
        ifft_col.process(&mut col_data);
        for (row, val) in col_data.into_iter().enumerate() {
            work[[row, col]] = val;
        }
    }

    for row in 0..h {
        let mut row_data: Vec<Complex<f64>> = (0..w).map(|c| work[[row, c]]).collect();
        ifft_row.process(&mut row_data);
        for (col, val) in row_data.into_iter().enumerate() {
            work[[row, col]] = val;
        }
    }

    let scale = 1.0 / (h * w) as f64;
    work.mapv(|v| v.re * scale)
}

/// Centered frequency indices for a dimension of length `n`:
/// `[0, 1, ..., ceil(n/2)-1, -floor(n/2), ..., -1]`, i.e. the
/// inverse-fft-shift of the integer range `[-floor(n/2), ceil(n/2))`.
fn frequency_indices(n: usize) -> Vec<f64> {
    let half = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < half {
                k as f64
            } else {
                k as f64 - n as f64
            }
        })
        .collect()
}

/// Translate `data` by `shift` pixels with wrap-around boundaries.
///
/// Positive `shift.row` moves content down, positive `shift.col` moves it
/// right, matching the array index convention.
pub fn shift_array(data: &Array2<f32>, shift: Shift) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut spectrum = fft2d_forward(data);

    let row_freq = frequency_indices(h);
    let col_freq = frequency_indices(w);

    for row in 0..h {
        let row_phase = -shift.row * row_freq[row] / h as f64;
        for col in 0..w {
            let phase = TAU * (row_phase - shift.col * col_freq[col] / w as f64);
            spectrum[[row, col]] *= Complex::new(phase.cos(), phase.sin());
        }
    }

    ifft2d_real(&spectrum).mapv(|v| v as f32)
}

/// Translate a frame by `shift` pixels with wrap-around boundaries.
pub fn shift_frame(frame: &Frame, shift: Shift) -> Frame {
    Frame::new(shift_array(&frame.data, shift))
}
