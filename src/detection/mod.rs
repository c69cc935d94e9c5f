pub mod preprocessing;
pub mod hough;
pub mod mask;
pub mod annotate;

use image::GrayImage;
use crate::error::SearchError;
use crate::models::Candidate;

pub use hough::HoughGradientDetector;

/// Something that finds circles in a grayscale image.
///
/// Candidates come back strongest first; an empty vector means nothing was found.
pub trait CircleDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<Candidate>;
}

impl<F> CircleDetector for F
where
    F: Fn(&GrayImage) -> Vec<Candidate>,
{
    fn detect(&self, gray: &GrayImage) -> Vec<Candidate> {
        self(gray)
    }
}

/// Parameters for the gradient Hough circle transform
#[derive(Debug, Clone, PartialEq)]
pub struct HoughParams {
    /// Inverse ratio of accumulator resolution to image resolution
    pub dp: f32,
    /// Minimum distance between detected centers
    pub min_dist: f32,
    /// Upper Canny threshold (the lower one is half of it)
    pub param1: f32,
    /// Accumulator votes a center needs, and edge support a radius needs
    pub param2: u32,
    pub min_radius: u32,
    /// 0 means no upper bound
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            dp: 1.2,
            min_dist: 20.0,
            param1: 50.0,
            param2: 30,
            min_radius: 10,
            max_radius: 0,
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.dp.is_finite() || self.dp < 1.0 {
            return Err(SearchError::InvalidConfig(format!(
                "dp must be at least 1.0, got {}",
                self.dp
            )));
        }
        if !self.min_dist.is_finite() || self.min_dist <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "min_dist must be positive, got {}",
                self.min_dist
            )));
        }
        if !self.param1.is_finite() || self.param1 <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "param1 must be positive, got {}",
                self.param1
            )));
        }
        if self.param2 == 0 {
            return Err(SearchError::InvalidConfig(
                "param2 must be positive".to_string(),
            ));
        }
        if self.max_radius != 0 && self.max_radius < self.min_radius {
            return Err(SearchError::InvalidConfig(format!(
                "max_radius {} is below min_radius {}",
                self.max_radius, self.min_radius
            )));
        }
        Ok(())
    }

    /// Upper radius bound for an image of the given size.
    /// Never exceeds the image diagonal.
    pub fn effective_max_radius(&self, width: u32, height: u32) -> u32 {
        if self.max_radius == 0 {
            return width.max(height);
        }
        let diagonal = (width as f64).hypot(height as f64).ceil() as u32;
        self.max_radius.min(diagonal)
    }
}
