//! Color values with straight (non-premultiplied) alpha.

use serde::{Deserialize, Serialize};

/// An sRGB color with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from an `[r, g, b]` triple.
    pub const fn opaque([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composite this color over an opaque background, returning `[r, g, b]`.
    pub fn over(self, background: [u8; 3]) -> [u8; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (bg as f32 + (fg as f32 - bg as f32) * a).round() as u8;
        [
            mix(self.r, background[0]),
            mix(self.g, background[1]),
            mix(self.b, background[2]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_black() {
        let c = Rgba::new(0, 180, 216, 0.5);
        assert_eq!(c.over([0, 0, 0]), [0, 90, 108]);
    }

    #[test]
    fn test_over_extremes() {
        let c = Rgba::new(200, 100, 50, 1.0);
        assert_eq!(c.over([10, 10, 10]), [200, 100, 50]);
        assert_eq!(c.with_alpha(0.0).over([10, 20, 30]), [10, 20, 30]);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::opaque([1, 2, 3]).with_alpha(4.0).a, 1.0);
    }
}
