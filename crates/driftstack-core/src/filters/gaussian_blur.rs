use ndarray::Array2;

use crate::consts::BLUR_SIGMA;
use crate::frame::Frame;

/// Blur a frame with a square Gaussian kernel of the given odd size.
///
/// Sigma is fixed at [`BLUR_SIGMA`]; only the kernel footprint is
/// configurable. Used to suppress high-frequency noise that would bias the
/// shift estimator.
pub fn gaussian_blur(frame: &Frame, kernel_size: usize) -> Frame {
    Frame::new(gaussian_blur_array(&frame.data, kernel_size))
}

/// Blur a raw array using separable 1-D convolution with clamped borders.
pub fn gaussian_blur_array(data: &Array2<f32>, kernel_size: usize) -> Array2<f32> {
    let kernel = make_kernel(kernel_size, BLUR_SIGMA);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_kernel(size: usize, sigma: f32) -> Vec<f32> {
    let radius = size / 2;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / s2).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;
    let mut result = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let mut sum = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let c = (col as isize + k as isize - radius as isize)
                    .clamp(0, w as isize - 1) as usize;
                sum += data[[row, c]] * kv;
            }
            result[[row, col]] = sum;
        }
    }

    result
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;
    let mut result = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let mut sum = 0.0f32;
            for (k, &kv) in kernel.iter().enumerate() {
                let r = (row as isize + k as isize - radius as isize)
                    .clamp(0, h as isize - 1) as usize;
                sum += data[[r, col]] * kv;
            }
            result[[row, col]] = sum;
        }
    }

    result
}
