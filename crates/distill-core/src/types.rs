//! Core value types shared by the raw and output models.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A color value as reported by the host, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Convert to 8-bit RGB channels.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// Upper-case `#RRGGBB`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Canonical CSS form of this color multiplied by an extra paint opacity.
    ///
    /// Fully opaque colors become `#RRGGBB`; anything else becomes
    /// `rgba(r,g,b,a)` with integer channels and a two-decimal alpha.
    pub fn to_css(&self, opacity: f64) -> String {
        let alpha = round_to((self.a * opacity).clamp(0.0, 1.0), 2);
        if alpha >= 1.0 {
            self.to_hex()
        } else {
            let (r, g, b) = self.to_rgb8();
            format!("rgba({},{},{},{:.2})", r, g, b, alpha)
        }
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    // Normalize negative zero so it never prints as "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A number in the output tree.
///
/// Serializes as an integer whenever the value is integral so the output
/// carries `280` rather than `280.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Num(pub f64);

impl Num {
    /// Rounded to whole device-independent pixels.
    pub fn px(value: f64) -> Self {
        Num(round_to(value, 0))
    }

    /// Rounded to two decimals.
    pub fn dec2(value: f64) -> Self {
        Num(round_to(value, 2))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Num {
    fn from(value: f64) -> Self {
        Num(value)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
            write!(f, "{}", v as i64)
        } else {
            write!(f, "{}", v)
        }
    }
}

impl Serialize for Num {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

/// A 2×3 affine transform `[[a, b, tx], [c, d, ty]]` as used by paints.
pub type Transform2D = [[f64; 3]; 2];
