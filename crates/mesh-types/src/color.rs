use serde::{Deserialize, Serialize};

/// Bit 15 of a packed facet attribute: the facet uses the header default colour.
pub const RGB555_USE_DEFAULT: u16 = 0x8000;

/// A linear RGB colour with each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode the low 15 bits of a packed RGB555 value.
    ///
    /// Red occupies bits 0..4, green bits 5..9 and blue bits 10..14. Each
    /// 5-bit channel is scaled by 1/31. Bit 15 is ignored here; callers decide
    /// whether it selects a default colour.
    pub fn from_rgb555(packed: u16) -> Self {
        Self {
            r: f32::from(packed & 0x1F) / 31.0,
            g: f32::from((packed >> 5) & 0x1F) / 31.0,
            b: f32::from((packed >> 10) & 0x1F) / 31.0,
        }
    }

    /// Encode into RGB555 with bit 15 clear. Channels are clamped to [0, 1].
    pub fn to_rgb555(&self) -> u16 {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 31.0).round() as u16;
        quantize(self.r) | (quantize(self.g) << 5) | (quantize(self.b) << 10)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// An RGBA colour with each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Build from 8-bit channels, each divided by 255.
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Drop the alpha channel.
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb555_zero_is_black() {
        assert_eq!(Rgb::from_rgb555(0x0000), Rgb::BLACK);
    }

    #[test]
    fn rgb555_channels_are_split_by_five_bits() {
        // r = 31, g = 0, b = 0
        assert_eq!(Rgb::from_rgb555(0x001F), Rgb::new(1.0, 0.0, 0.0));
        // g = 31
        assert_eq!(Rgb::from_rgb555(0x03E0), Rgb::new(0.0, 1.0, 0.0));
        // b = 31
        assert_eq!(Rgb::from_rgb555(0x7C00), Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rgb555_ignores_default_flag() {
        assert_eq!(
            Rgb::from_rgb555(RGB555_USE_DEFAULT | 0x001F),
            Rgb::from_rgb555(0x001F)
        );
    }

    #[test]
    fn rgb555_encode_matches_decode() {
        let packed = 0x1234 & 0x7FFF;
        assert_eq!(Rgb::from_rgb555(packed).to_rgb555(), packed);
    }

    #[test]
    fn rgba_from_bytes_scales_to_unit_range() {
        let c = Rgba::from_bytes(255, 0, 51, 255);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.rgb(), Rgb::new(1.0, 0.0, c.b));
    }
}
