use serde::{Deserialize, Serialize};

use crate::core::{Color, DisplayUnits, FontSpec, FormatLocale};
use crate::error::{ChartError, ChartResult};

use super::validation::validate_settings;

/// Which side the category axis is drawn on.
///
/// `Left` stacks categories vertically with values running horizontally;
/// `Bottom` is the transpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryAxisOrientation {
    #[default]
    Left,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryAxisSettings {
    pub orientation: CategoryAxisOrientation,
    /// Gap between category bands in percent of a band step (0..=50).
    /// Only applied to the `Bottom` orientation.
    pub inner_padding: f64,
    pub color: Color,
    /// Label size in points.
    pub font_size: f64,
    pub font_family: String,
}

impl Default for CategoryAxisSettings {
    fn default() -> Self {
        Self {
            orientation: CategoryAxisOrientation::Left,
            inner_padding: 20.0,
            color: Color::from_rgb8(0x77, 0x77, 0x77),
            font_size: 9.0,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }
}

impl CategoryAxisSettings {
    #[must_use]
    pub fn font(&self) -> FontSpec {
        FontSpec::from_points(self.font_family.clone(), self.font_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueAxisSettings {
    pub color: Color,
    pub font_size: f64,
    pub font_family: String,
    pub display_units: DisplayUnits,
    /// Fixed decimal count for axis labels (0..=5); `None` derives it from
    /// the tick step.
    pub decimal_places: Option<u8>,
}

impl Default for ValueAxisSettings {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0x77, 0x77, 0x77),
            font_size: 9.0,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            display_units: DisplayUnits::Auto,
            decimal_places: None,
        }
    }
}

impl ValueAxisSettings {
    #[must_use]
    pub fn font(&self) -> FontSpec {
        FontSpec::from_points(self.font_family.clone(), self.font_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPointSettings {
    /// Dot radius in pixels (2..=10).
    pub radius: f64,
    /// Used when the measure column carries no format string.
    pub default_format: String,
    /// Used for the implicit group when no series field is bound.
    pub default_fill: Color,
}

impl Default for DataPointSettings {
    fn default() -> Self {
        Self {
            radius: 6.0,
            default_format: "#,0.00".to_owned(),
            default_fill: Color::from_rgb8(0x01, 0xb8, 0xaa),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectingLineSettings {
    pub stroke_width: f64,
    pub color: Color,
}

impl Default for ConnectingLineSettings {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            color: Color::from_rgb8(0xc8, 0xc8, 0xc8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLabelSettings {
    pub show: bool,
    pub color: Color,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for DataLabelSettings {
    fn default() -> Self {
        Self {
            show: false,
            color: Color::from_rgb8(0x44, 0x44, 0x44),
            font_size: 8.0,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }
}

impl DataLabelSettings {
    #[must_use]
    pub fn font(&self) -> FontSpec {
        FontSpec::from_points(self.font_family.clone(), self.font_size)
    }
}

pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";

/// User-configured chart options.
///
/// Every section defaults independently so hosts can persist partial JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub category_axis: CategoryAxisSettings,
    pub value_axis: ValueAxisSettings,
    pub data_point: DataPointSettings,
    pub connecting_line: ConnectingLineSettings,
    pub data_labels: DataLabelSettings,
    pub locale: FormatLocale,
}

impl ChartSettings {
    /// Parses and validates persisted settings.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let settings: Self = serde_json::from_str(input)
            .map_err(ChartError::json("failed to parse settings json"))?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(ChartError::json("failed to serialize settings json"))
    }

    /// Inner padding actually applied to the category bands, as a fraction.
    #[must_use]
    pub fn effective_inner_padding(&self) -> f64 {
        match self.category_axis.orientation {
            CategoryAxisOrientation::Left => 0.0,
            CategoryAxisOrientation::Bottom => self.category_axis.inner_padding / 100.0,
        }
    }
}
