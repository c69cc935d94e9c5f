use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use crate::models::Circle;

pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const CENTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline stroke width in pixels
pub const OUTLINE_THICKNESS: i32 = 3;

/// Radius of the center dot
pub const CENTER_DOT_RADIUS: i32 = 3;

/// Draw the detected circle outline and its center onto the image
pub fn annotate(img: &mut RgbImage, circle: &Circle) {
    let (x, y) = circle.center();
    let center = (x as i32, y as i32);
    let radius = circle.radius as i32;

    // Stroke is centered on the detected radius
    let half = OUTLINE_THICKNESS / 2;
    for r in (radius - half)..=(radius + half) {
        if r > 0 {
            draw_hollow_circle_mut(img, center, r, OUTLINE_COLOR);
        }
    }

    draw_filled_circle_mut(img, center, CENTER_DOT_RADIUS, CENTER_COLOR);
}
