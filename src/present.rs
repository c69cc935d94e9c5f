use image::RgbImage;
use std::path::PathBuf;
use anyhow::Result;

/// Receives the annotated image after a successful search.
///
/// Called at most once per run.
pub trait Presenter {
    fn present(&mut self, image: &RgbImage) -> Result<()>;
}

impl<F> Presenter for F
where
    F: FnMut(&RgbImage) -> Result<()>,
{
    fn present(&mut self, image: &RgbImage) -> Result<()> {
        self(image)
    }
}

/// Writes the annotated image to disk, format chosen by file extension
pub struct FilePresenter {
    pub path: PathBuf,
}

impl FilePresenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Presenter for FilePresenter {
    fn present(&mut self, image: &RgbImage) -> Result<()> {
        image.save(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", self.path.display(), e))?;
        tracing::info!("Annotated image written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(feature = "gui")]
pub use window::WindowPresenter;

#[cfg(feature = "gui")]
mod window {
    use super::Presenter;
    use anyhow::Result;
    use image::RgbImage;
    use minifb::{KeyRepeat, Window, WindowOptions};

    /// Shows the image in a window and blocks until a key is pressed or the
    /// window is closed
    pub struct WindowPresenter {
        pub title: String,
    }

    impl WindowPresenter {
        pub fn new(title: impl Into<String>) -> Self {
            Self { title: title.into() }
        }
    }

    impl Default for WindowPresenter {
        fn default() -> Self {
            Self::new("Detected Circle")
        }
    }

    impl Presenter for WindowPresenter {
        fn present(&mut self, image: &RgbImage) -> Result<()> {
            let (width, height) = (image.width() as usize, image.height() as usize);

            // minifb wants 0RGB packed into u32
            let buffer: Vec<u32> = image
                .pixels()
                .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
                .collect();

            let mut window = Window::new(&self.title, width, height, WindowOptions::default())
                .map_err(|e| anyhow::anyhow!("Failed to open window: {}", e))?;
            window.set_target_fps(30);

            while window.is_open() {
                window.update_with_buffer(&buffer, width, height)
                    .map_err(|e| anyhow::anyhow!("Failed to update window: {}", e))?;
                if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
                    break;
                }
            }

            Ok(())
        }
    }
}
