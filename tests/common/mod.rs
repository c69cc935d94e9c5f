mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from circlescan for tests
pub use circlescan::{
    Candidate, Circle, CircleDetector, CircleSearch, HoughGradientDetector, HoughParams,
    Presenter, SearchConfig, SearchError, SearchOutcome,
};
