use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing_subscriber::fmt::MakeWriter;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRAY: Rgb<u8> = Rgb([128, 128, 128]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// A `width` x `height` image filled with `color`
pub fn blank_image(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// A white filled disk on a black background
pub fn disk_image(width: u32, height: u32, center: (i32, i32), radius: i32) -> RgbImage {
    let mut img = blank_image(width, height, BLACK);
    draw_filled_circle_mut(&mut img, center, radius, WHITE);
    img
}

/// Saves the image to a temporary PNG that is removed on drop
pub fn save_temp_png(img: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Asserts that `circle` lies within `tolerance` pixels of the expected values
pub fn assert_circle_near(circle: &circlescan::Circle, x: u32, y: u32, radius: u32, tolerance: u32) {
    let close = |a: u32, b: u32| a.abs_diff(b) <= tolerance;
    assert!(
        close(circle.x, x) && close(circle.y, y) && close(circle.radius, radius),
        "expected circle near ({x}, {y}, r={radius}), got {circle:?}"
    );
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with info-level logging routed into a buffer, returning both
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
