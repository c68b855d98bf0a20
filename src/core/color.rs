use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as `#rrggbb` (or `#rrggbbaa` when not opaque) so persisted
/// settings stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        let invalid = || ChartError::InvalidData(format!("invalid hex color `{input}`"));
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |text: &str| u8::from_str_radix(text, 16).map_err(|_| invalid());

        let (red, green, blue, alpha) = match digits.len() {
            3 => {
                let expand = |index: usize| channel(&digits[index..=index].repeat(2));
                (expand(0)?, expand(1)?, expand(2)?, 255)
            }
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                255,
            ),
            8 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            ),
            _ => return Err(invalid()),
        };

        Ok(Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        ))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let rgb = format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        );
        if byte(self.alpha) == 255 {
            rgb
        } else {
            format!("{rgb}{:02x}", byte(self.alpha))
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Resolves the display color of a series.
///
/// Implementations must be deterministic: the same key always yields the
/// same color for the provider's lifetime.
pub trait ColorProvider {
    fn color_for(&mut self, key: &str) -> Color;
}

/// Default categorical palette.
pub const DEFAULT_PALETTE: [Color; 12] = [
    Color::from_rgb8(0x01, 0xb8, 0xaa),
    Color::from_rgb8(0x37, 0x46, 0x49),
    Color::from_rgb8(0xfd, 0x62, 0x5e),
    Color::from_rgb8(0xf2, 0xc8, 0x0f),
    Color::from_rgb8(0x5f, 0x6b, 0x6d),
    Color::from_rgb8(0x8a, 0xd4, 0xeb),
    Color::from_rgb8(0xfe, 0x96, 0x66),
    Color::from_rgb8(0xa6, 0x69, 0xa3),
    Color::from_rgb8(0x35, 0x99, 0xb8),
    Color::from_rgb8(0xdf, 0xbf, 0xbf),
    Color::from_rgb8(0x4a, 0xc5, 0xbb),
    Color::from_rgb8(0x8d, 0x6f, 0xd1),
];

/// Assigns palette entries to keys in first-request order and remembers the
/// assignment, wrapping around once the palette is exhausted.
#[derive(Debug, Clone)]
pub struct PaletteColorProvider {
    palette: Vec<Color>,
    assigned: IndexMap<String, Color>,
}

impl PaletteColorProvider {
    pub fn new(palette: Vec<Color>) -> ChartResult<Self> {
        if palette.is_empty() {
            return Err(ChartError::InvalidData(
                "color palette must not be empty".to_owned(),
            ));
        }
        for color in &palette {
            color.validate()?;
        }
        Ok(Self {
            palette,
            assigned: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn assigned(&self) -> &IndexMap<String, Color> {
        &self.assigned
    }
}

impl Default for PaletteColorProvider {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            assigned: IndexMap::new(),
        }
    }
}

impl ColorProvider for PaletteColorProvider {
    fn color_for(&mut self, key: &str) -> Color {
        if let Some(color) = self.assigned.get(key) {
            return *color;
        }
        let color = self.palette[self.assigned.len() % self.palette.len()];
        self.assigned.insert(key.to_owned(), color);
        color
    }
}
