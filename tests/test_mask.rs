use circlescan::detection::mask::{apply_mask, circular_mask, mask_center, MASK_ON};
use circlescan::mask_radii;
use image::{Rgb, RgbImage};

#[test]
fn test_radii_start_at_one_and_stay_below_height() {
    let radii: Vec<u32> = mask_radii(6).collect();
    assert_eq!(radii, vec![1, 2, 3, 4, 5]);
    assert!(radii.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn test_no_radii_for_degenerate_heights() {
    assert_eq!(mask_radii(0).count(), 0);
    assert_eq!(mask_radii(1).count(), 0);
}

#[test]
fn test_mask_center_uses_integer_halves() {
    assert_eq!(mask_center(7, 5), (3, 2));
    assert_eq!(mask_center(8, 6), (4, 3));
}

#[test]
fn test_mask_area_grows_with_radius() {
    let set_pixels = |radius| {
        circular_mask(50, 40, radius)
            .pixels()
            .filter(|p| p[0] == MASK_ON)
            .count()
    };

    let areas: Vec<usize> = mask_radii(20).map(set_pixels).collect();
    assert!(areas.windows(2).all(|w| w[1] > w[0]), "areas: {areas:?}");
}

#[test]
fn test_mask_is_binary() {
    let mask = circular_mask(30, 30, 9);
    assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == MASK_ON));
}

#[test]
fn test_apply_mask_blacks_out_outside() {
    let img = RgbImage::from_pixel(21, 21, Rgb([10, 200, 30]));
    let mask = circular_mask(21, 21, 4);
    let masked = apply_mask(&img, &mask);

    assert_eq!(*masked.get_pixel(10, 10), Rgb([10, 200, 30]));
    assert_eq!(*masked.get_pixel(14, 10), Rgb([10, 200, 30]));
    assert_eq!(*masked.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(*masked.get_pixel(20, 20), Rgb([0, 0, 0]));

    // Source is untouched
    assert_eq!(*img.get_pixel(0, 0), Rgb([10, 200, 30]));
}
