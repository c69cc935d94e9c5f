use std::path::PathBuf;
use thiserror::Error;

/// Failures the circle search can report.
///
/// Library functions return `anyhow::Result`; these values travel inside it
/// and can be recovered with `downcast_ref::<SearchError>()`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("could not load image at '{}'", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("invalid detector parameters: {0}")]
    InvalidConfig(String),

    #[error("debug directory is not empty: {}", .0.display())]
    DebugDirNotEmpty(PathBuf),

    #[error("failed to present annotated image: {0}")]
    Present(anyhow::Error),
}
