//! Jet color ramp.
//!
//! Dark blue at 0, through blue, cyan, yellow and red, to dark red at 255.
//! Each channel is a clamped triangle: `clamp(1.5 - |4x - c|)` with
//! `c = 3, 2, 1` for red, green and blue.

use image::Rgb;

/// Precomputed jet lookup table indexed by quantized intensity.
pub struct JetColormap {
    table: [Rgb<u8>; 256],
}

impl JetColormap {
    /// Build the lookup table.
    pub fn new() -> Self {
        let mut table = [Rgb([0, 0, 0]); 256];
        for (value, entry) in (0u8..=255).zip(table.iter_mut()) {
            *entry = jet(f32::from(value) / 255.0);
        }
        Self { table }
    }

    /// Color for a quantized intensity.
    pub fn color(&self, value: u8) -> Rgb<u8> {
        self.table[usize::from(value)]
    }
}

impl Default for JetColormap {
    fn default() -> Self {
        Self::new()
    }
}

/// Color for a normalized intensity in `[0, 1]`.
pub fn jet(x: f32) -> Rgb<u8> {
    let x = x.clamp(0.0, 1.0);
    let channel = |center: f32| -> u8 {
        let v = (1.5 - 4.0f32.mul_add(x, -center).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}
