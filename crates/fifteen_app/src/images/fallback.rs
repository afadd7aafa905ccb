//! Bundled fallback picture.
//!
//! Generated rather than shipped as an asset: a smooth two-axis
//! gradient with enough variation that every slice reads as a distinct
//! tile. Reachable with zero network access.

use image::{DynamicImage, Rgba, RgbaImage};

const SIZE: u32 = 512;

/// Builds the fallback puzzle picture.
pub fn fallback_image() -> DynamicImage {
    let mut img = RgbaImage::new(SIZE, SIZE);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let fx = x as f32 / (SIZE - 1) as f32;
        let fy = y as f32 / (SIZE - 1) as f32;
        let r = (40.0 + 180.0 * fx) as u8;
        let g = (40.0 + 180.0 * fy) as u8;
        let b = (230.0 - 120.0 * fx * fy) as u8;
        *pixel = Rgba([r, g, b, 255]);
    }
    DynamicImage::ImageRgba8(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::split::split_into_grid;

    #[test]
    fn test_fallback_is_square() {
        let img = fallback_image();
        assert_eq!(img.width(), SIZE);
        assert_eq!(img.height(), SIZE);
    }

    #[test]
    fn test_fallback_slices_are_distinct() {
        let set = split_into_grid(&fallback_image());
        let mut colors: Vec<[u8; 3]> = (0..16)
            .map(|v| set.piece(v).expect("piece").average)
            .collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), 16, "gradient slices should all differ");
    }
}
