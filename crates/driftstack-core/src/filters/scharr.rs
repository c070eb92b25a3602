use ndarray::Array2;

use crate::frame::Frame;

/// Scharr gradient-magnitude edge filter.
///
/// Combines the vertical and horizontal Scharr derivatives as
/// `sqrt(gv^2 + gh^2)`. Makes registration contrast-invariant when frame
/// intensity varies across a stack. The 1-pixel border is zero (the kernels
/// need a 3x3 neighborhood).
pub fn scharr_magnitude(frame: &Frame) -> Frame {
    Frame::new(scharr_magnitude_array(&frame.data))
}

/// Scharr kernels:
///   Gx = [[-3, 0, 3], [-10, 0, 10], [-3, 0, 3]]
///   Gy = [[-3, -10, -3], [0, 0, 0], [3, 10, 3]]
pub fn scharr_magnitude_array(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));

    if h < 3 || w < 3 {
        return result;
    }

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let gx = -3.0 * data[[row - 1, col - 1]] as f64
                + 3.0 * data[[row - 1, col + 1]] as f64
                - 10.0 * data[[row, col - 1]] as f64
                + 10.0 * data[[row, col + 1]] as f64
                - 3.0 * data[[row + 1, col - 1]] as f64
                + 3.0 * data[[row + 1, col + 1]] as f64;

            let gy = -3.0 * data[[row - 1, col - 1]] as f64
                - 10.0 * data[[row - 1, col]] as f64
                - 3.0 * data[[row - 1, col + 1]] as f64
                + 3.0 * data[[row + 1, col - 1]] as f64
                + 10.0 * data[[row + 1, col]] as f64
                + 3.0 * data[[row + 1, col + 1]] as f64;

            result[[row, col]] = (gx * gx + gy * gy).sqrt() as f32;
        }
    }

    result
}
