pub mod detection;
pub mod error;
pub mod models;
pub mod present;
pub mod search;

pub use models::{Candidate, Circle, SearchOutcome};
pub use error::SearchError;
pub use detection::{CircleDetector, HoughGradientDetector, HoughParams};
pub use present::{FilePresenter, Presenter};
pub use search::{
    load_image, mask_radii, CircleSearch, DebugConfig, SearchConfig, DEFAULT_IMAGE_PATH,
};

#[cfg(feature = "gui")]
pub use present::WindowPresenter;
