use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

/// Mask value inside the disk
pub const MASK_ON: u8 = 255;

/// Center used for every search mask: (width / 2, height / 2).
pub fn mask_center(width: u32, height: u32) -> (i32, i32) {
    ((width / 2) as i32, (height / 2) as i32)
}

/// Build a zero mask with a filled disk of `radius` at the image center
pub fn circular_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    draw_filled_circle_mut(
        &mut mask,
        mask_center(width, height),
        radius as i32,
        Luma([MASK_ON]),
    );
    mask
}

/// Keep pixels where the mask is set, black out the rest.
///
/// The mask must have the same dimensions as the image.
pub fn apply_mask(img: &RgbImage, mask: &GrayImage) -> RgbImage {
    debug_assert_eq!(img.dimensions(), mask.dimensions());

    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        if mask.get_pixel(x, y)[0] != 0 {
            out.put_pixel(x, y, *pixel);
        } else {
            out.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    out
}
