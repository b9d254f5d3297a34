/// A straight-alpha RGBA color with channels in `0..=1`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

/// Create an opaque [`Color`] from a hex string at compile time.
#[macro_export]
macro_rules! rgb {
    ($hex:literal) => {{
        const fn hex_char_to_num(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("Invalid hex character"),
            }
        }

        const fn parse_hex_byte(high: u8, low: u8) -> u8 {
            hex_char_to_num(high) * 16 + hex_char_to_num(low)
        }

        const COLOR: $crate::style::Color = {
            let bytes = $hex.as_bytes();
            let start = if bytes[0] == b'#' { 1 } else { 0 };
            if bytes.len() - start != 6 {
                panic!("Invalid hex color: must be 6 hex digits");
            }
            $crate::style::Color::rgb8(
                parse_hex_byte(bytes[start], bytes[start + 1]),
                parse_hex_byte(bytes[start + 2], bytes[start + 3]),
                parse_hex_byte(bytes[start + 4], bytes[start + 5]),
            )
        };
        COLOR
    }};
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Construct a color from float channels.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation towards `other`; `t` is clamped to `0..=1`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Scale the RGB channels, clamping to the valid range.
    pub fn scale(self, factor: f32) -> Self {
        let s = |c: f32| (c * factor).clamp(0.0, 1.0);
        Self {
            r: s(self.r),
            g: s(self.g),
            b: s(self.b),
            a: self.a,
        }
    }
}
