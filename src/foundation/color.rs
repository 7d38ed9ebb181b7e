use crate::foundation::core::Rgba8;

/// Normalize a hue in degrees into `[0, 360)`.
pub fn wrap_hue(hue: f64) -> f64 {
    let h = hue.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

/// CSS-style HSLA color: hue in degrees, saturation/lightness in percent, alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Convert to straight sRGB bytes. Out-of-range inputs are wrapped (hue) or clamped.
    pub fn to_rgba8(self) -> Rgba8 {
        let h = wrap_hue(self.hue) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        let to_u8 = |v: f64| -> u8 { ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8 };
        Rgba8 {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }
}
