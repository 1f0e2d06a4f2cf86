//! RGBA color with CSS-style hex parsing (`#rgb`, `#rrggbb`, `#rrggbbaa`).

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color '{input}' must start with '#'")]
    MissingHash { input: String },
    #[error("color '{input}' has {len} hex digits; expected 3, 6 or 8")]
    BadLength { input: String, len: usize },
    #[error("color '{input}' contains a non-hex digit")]
    BadDigit { input: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash {
                input: input.to_string(),
            })?;
        let bad_digit = || ColorParseError::BadDigit {
            input: input.to_string(),
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad_digit());
        }
        let channel = |s: &str| -> Result<f32, ColorParseError> {
            u8::from_str_radix(s, 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| bad_digit())
        };
        match digits.len() {
            3 => {
                let mut out = [0.0f32; 3];
                for (i, c) in digits.chars().enumerate() {
                    let doubled = format!("{c}{c}");
                    out[i] = channel(&doubled)?;
                }
                Ok(Self::rgba(out[0], out[1], out[2], 1.0))
            }
            6 | 8 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    1.0
                };
                Ok(Self::rgba(r, g, b, a))
            }
            len => Err(ColorParseError::BadLength {
                input: input.to_string(),
                len,
            }),
        }
    }

    /// Format as `#rrggbb` (alpha dropped when opaque).
    pub fn to_hex(self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}
