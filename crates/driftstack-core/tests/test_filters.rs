use ndarray::Array2;

use driftstack_core::filters::{
    gaussian_blur, gaussian_blur_array, scharr_magnitude, scharr_magnitude_array,
};
use driftstack_core::frame::Frame;

fn make_frame(h: usize, w: usize, fill: f32) -> Frame {
    Frame::new(Array2::from_elem((h, w), fill))
}

// ---------------------------------------------------------------------------
// Gaussian blur
// ---------------------------------------------------------------------------

#[test]
fn test_blur_uniform_image_unchanged() {
    let frame = make_frame(32, 32, 0.6);
    let blurred = gaussian_blur(&frame, 7);
    for v in blurred.data.iter() {
        assert!((*v - 0.6).abs() < 1e-5, "expected 0.6, got {v}");
    }
}

#[test]
fn test_blur_preserves_shape() {
    let frame = make_frame(13, 27, 0.1);
    let blurred = gaussian_blur(&frame, 7);
    assert_eq!(blurred.height(), 13);
    assert_eq!(blurred.width(), 27);
}

#[test]
fn test_blur_kernel_size_one_is_identity() {
    // Radius 0: the kernel is a single normalized tap.
    let mut data = Array2::<f32>::zeros((8, 8));
    data[[3, 4]] = 1.0;
    let blurred = gaussian_blur_array(&data, 1);
    for (a, b) in data.iter().zip(blurred.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn test_blur_smooths_checkerboard() {
    let h = 32usize;
    let w = 32usize;
    let data = Array2::from_shape_fn((h, w), |(r, c)| ((r + c) % 2) as f32);
    let blurred = gaussian_blur_array(&data, 7);

    // Interior pixels approach the 0.5 average once high frequencies are
    // attenuated.
    for row in 8..h - 8 {
        for col in 8..w - 8 {
            let v = blurred[[row, col]];
            assert!(
                (v - 0.5).abs() < 0.05,
                "interior pixel ({row},{col}) should be ~0.5, got {v}"
            );
        }
    }
}

#[test]
fn test_blur_spreads_impulse() {
    let mut data = Array2::<f32>::zeros((16, 16));
    data[[8, 8]] = 1.0;
    let blurred = gaussian_blur_array(&data, 7);

    assert!(blurred[[8, 8]] < 1.0);
    assert!(blurred[[8, 9]] > 0.0);
    assert!(blurred[[9, 8]] > 0.0);
}

// ---------------------------------------------------------------------------
// Scharr gradient magnitude
// ---------------------------------------------------------------------------

#[test]
fn test_scharr_flat_image_is_zero() {
    let frame = make_frame(16, 16, 0.7);
    let edges = scharr_magnitude(&frame);
    for v in edges.data.iter() {
        assert!(v.abs() < 1e-5, "flat image should have no gradient, got {v}");
    }
}

#[test]
fn test_scharr_detects_vertical_edge() {
    let h = 16usize;
    let w = 16usize;
    let data = Array2::from_shape_fn((h, w), |(_, c)| if c < w / 2 { 0.0 } else { 1.0 });
    let edges = scharr_magnitude_array(&data);

    // Strong response on the columns adjacent to the step, none far away.
    assert!(edges[[8, w / 2 - 1]] > 1.0);
    assert!(edges[[8, w / 2]] > 1.0);
    assert!(edges[[8, 2]].abs() < 1e-5);
    assert!(edges[[8, w - 3]].abs() < 1e-5);
}

#[test]
fn test_scharr_border_is_zero() {
    let data = Array2::from_shape_fn((10, 10), |(r, c)| (r * 10 + c) as f32);
    let edges = scharr_magnitude_array(&data);

    for c in 0..10 {
        assert_eq!(edges[[0, c]], 0.0);
        assert_eq!(edges[[9, c]], 0.0);
    }
    for r in 0..10 {
        assert_eq!(edges[[r, 0]], 0.0);
        assert_eq!(edges[[r, 9]], 0.0);
    }
}

#[test]
fn test_scharr_tiny_image_is_zero() {
    // Below the 3x3 neighborhood the filter has no support.
    let data = Array2::from_elem((2, 2), 1.0f32);
    let edges = scharr_magnitude_array(&data);
    for v in edges.iter() {
        assert_eq!(*v, 0.0);
    }
}

#[test]
fn test_scharr_contrast_scaling_is_linear() {
    let data = Array2::from_shape_fn((12, 12), |(r, c)| ((r * 13 + c * 7) % 5) as f32 * 0.1);
    let doubled = data.mapv(|v| v * 2.0);

    let e1 = scharr_magnitude_array(&data);
    let e2 = scharr_magnitude_array(&doubled);

    for (a, b) in e1.iter().zip(e2.iter()) {
        assert!((b - 2.0 * a).abs() < 1e-4);
    }
}
