use image::{EncodableLayout, GrayImage, ImageBuffer, ImageReader, PixelWithColorType, RgbImage};
use std::path::{Path, PathBuf};
use anyhow::Result;
use tracing::{debug, info};

use crate::detection::{annotate, mask, preprocessing, CircleDetector, HoughGradientDetector, HoughParams};
use crate::error::SearchError;
use crate::models::{Circle, SearchOutcome};
use crate::present::Presenter;

/// Default input image when none is given
pub const DEFAULT_IMAGE_PATH: &str = "can.png";

/// Settings for one search run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Gaussian sigma applied to the grayscale image before detection
    pub blur_sigma: f32,
    pub hough: HoughParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 2.0,
            hough: HoughParams::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "blur sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        self.hough.validate()
    }
}

/// Debug configuration for search execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Directory receiving intermediate images
    pub output_dir: PathBuf,
}

/// Load an image from disk as 8-bit RGB
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let load_error = |source: image::ImageError| SearchError::Load {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_error)?;

    Ok(img.to_rgb8())
}

/// Mask radii visited for an image of the given height: 1, 2, ..., height - 1
pub fn mask_radii(height: u32) -> impl Iterator<Item = u32> {
    1..height
}

/// Expanding-mask circle search.
///
/// Grows a filled disk from the image center one pixel per iteration and asks
/// the detector for circles each time, stopping at the first hit. The masked
/// image is computed every iteration but the detector always sees the whole
/// blurred grayscale image.
pub struct CircleSearch {
    config: SearchConfig,
    detector: Box<dyn CircleDetector>,
    debug: Option<DebugConfig>,
}

impl CircleSearch {
    /// Search with the built-in Hough detector configured from `config.hough`
    pub fn new(config: SearchConfig) -> Self {
        let detector = HoughGradientDetector::new(config.hough.clone());
        Self {
            config,
            detector: Box::new(detector),
            debug: None,
        }
    }

    /// Replace the detection capability
    pub fn with_detector(mut self, detector: Box<dyn CircleDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(SearchError::DebugDirNotEmpty(output_dir).into());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Grayscale and blurred grayscale versions of `image`
    pub fn preprocess(&self, image: &RgbImage) -> (GrayImage, GrayImage) {
        let gray = preprocessing::to_grayscale(image);
        let blurred = preprocessing::apply_blur(&gray, self.config.blur_sigma);
        (gray, blurred)
    }

    /// Run the search on `image`.
    ///
    /// On success the first candidate is drawn onto `image` and handed to
    /// `presenter` exactly once. Exhausting every mask radius is reported as
    /// [`SearchOutcome::NotFound`], not as an error.
    pub fn run(&self, image: &mut RgbImage, presenter: &mut dyn Presenter) -> Result<SearchOutcome> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SearchError::EmptyImage.into());
        }
        self.config.validate()?;

        self.save_debug(&*image, "00_input")?;

        debug!(width, height, sigma = self.config.blur_sigma, "Preprocessing image");
        let (gray, blurred) = self.preprocess(image);
        self.save_debug(&gray, "01_grayscale")?;
        self.save_debug(&blurred, "02_blurred")?;

        let mut iterations = 0;
        for radius in mask_radii(height) {
            iterations += 1;

            let mask = mask::circular_mask(width, height, radius);
            let masked = mask::apply_mask(image, &mask);

            let candidates = self.detector.detect(&blurred);
            let Some(&first) = candidates.first() else {
                info!(radius, "No circle detected");
                continue;
            };

            let circle = Circle::from_candidate(first);
            info!(
                radius,
                x = circle.x,
                y = circle.y,
                circle_radius = circle.radius,
                candidates = candidates.len(),
                "Circle detected"
            );

            self.save_debug(&masked, "03_masked")?;
            annotate::annotate(image, &circle);
            self.save_debug(&*image, "04_annotated")?;

            presenter.present(image).map_err(SearchError::Present)?;

            return Ok(SearchOutcome::Found {
                circle,
                mask_radius: radius,
            });
        }

        info!(iterations, "Search exhausted without detecting a circle");
        Ok(SearchOutcome::NotFound { iterations })
    }

    /// Save an intermediate image if debug mode is enabled
    fn save_debug<P>(&self, img: &ImageBuffer<P, Vec<P::Subpixel>>, name: &str) -> Result<()>
    where
        P: PixelWithColorType,
        [P::Subpixel]: EncodableLayout,
    {
        if let Some(debug_config) = &self.debug {
            let output_path = debug_config.output_dir.join(format!("{}.png", name));
            img.save(&output_path)
                .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
            debug!("Debug: saved {}", output_path.display());
        }
        Ok(())
    }
}

impl Default for CircleSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
