use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// Signed per-pixel gradient component
pub type GradientImage = ImageBuffer<Luma<i16>, Vec<i16>>;

/// Convert image to grayscale
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Apply Gaussian blur to reduce noise.
/// A non-positive or non-finite sigma leaves the image as is.
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    if !sigma.is_finite() || sigma <= 0.0 {
        return img.clone();
    }
    gaussian_blur_f32(img, sigma)
}

/// Canny edges with the low hysteresis threshold at half the high one
pub fn detect_edges(img: &GrayImage, high_threshold: f32) -> GrayImage {
    canny(img, high_threshold / 2.0, high_threshold)
}

/// Sobel gradients (dx, dy)
pub fn gradients(img: &GrayImage) -> (GradientImage, GradientImage) {
    (horizontal_sobel(img), vertical_sobel(img))
}
