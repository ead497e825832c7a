//! Label text drawn with an embedded 8x8 bitmap font.

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Glyph cell size in pixels before scaling.
const GLYPH_SIZE: u32 = 8;

/// Rendered footprint `(width, height)` of `text` at `scale`.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let cell = GLYPH_SIZE * scale.max(1);
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    (chars.saturating_mul(cell), cell)
}

fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Pixels outside the image are clipped. Characters without a glyph
/// leave a blank cell.
pub fn draw_text_mut(
    image: &mut RgbImage,
    text: &str,
    x: i32,
    y: i32,
    scale: u32,
    color: Rgb<u8>,
) {
    let scale = scale.max(1);
    let step = i32::try_from(scale).unwrap_or(i32::MAX);
    let cell = step.saturating_mul(8);

    for (index, c) in (0i32..).zip(text.chars()) {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let origin_x = x.saturating_add(cell.saturating_mul(index));

        for (row, bits) in (0i32..).zip(rows) {
            for col in 0..8i32 {
                // Bit 0 is the leftmost pixel.
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x.saturating_add(col * step);
                let py = y.saturating_add(row * step);
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_scales_with_length() {
        assert_eq!(text_size("car: 0.90", 1), (72, 8));
        assert_eq!(text_size("car: 0.90", 2), (144, 16));
        assert_eq!(text_size("", 2), (0, 16));
    }

    #[test]
    fn test_draw_text_sets_pixels_inside_footprint() {
        let mut image = RgbImage::new(40, 20);
        let white = Rgb([255, 255, 255]);
        draw_text_mut(&mut image, "A", 2, 2, 2, white);

        let lit: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == white)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| (2..18).contains(&x) && (2..18).contains(&y)));
    }

    #[test]
    fn test_draw_text_clips_at_edges() {
        let mut image = RgbImage::new(10, 10);
        draw_text_mut(&mut image, "WWWW", -12, -4, 3, Rgb([255, 0, 0]));
        draw_text_mut(&mut image, "WWWW", 8, 8, 3, Rgb([255, 0, 0]));
        assert_eq!(image.dimensions(), (10, 10));
    }
}
