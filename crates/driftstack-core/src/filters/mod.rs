pub mod gaussian_blur;
pub mod scharr;

pub use gaussian_blur::{gaussian_blur, gaussian_blur_array};
pub use scharr::{scharr_magnitude, scharr_magnitude_array};
