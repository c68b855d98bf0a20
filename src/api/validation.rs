use crate::core::{DataTable, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartSettings;

/// Result of checking a data table before aggregation.
///
/// Rejected input is an expected data condition, not an error: the engine
/// turns it into an invalid view model the renderer can clear itself from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

pub fn validate_data_table(table: &DataTable) -> ValidationOutcome {
    match table.categories.len() {
        0 => return ValidationOutcome::Invalid("no category column bound".to_owned()),
        1 => {}
        count => {
            return ValidationOutcome::Invalid(format!(
                "expected exactly one category column, found {count}"
            ));
        }
    }

    let row_count = table.category_count();
    if row_count == 0 {
        return ValidationOutcome::Invalid("category column has no rows".to_owned());
    }
    if table.groups.is_empty() {
        return ValidationOutcome::Invalid("no value columns bound".to_owned());
    }

    for (group_index, group) in table.groups.iter().enumerate() {
        if group.measure_column().is_none() {
            return ValidationOutcome::Invalid(format!(
                "value group {group_index} has no measure column"
            ));
        }
        for column in &group.columns {
            if column.values.len() != row_count {
                return ValidationOutcome::Invalid(format!(
                    "column `{}` has {} values for {row_count} categories",
                    column.source.query_name,
                    column.values.len()
                ));
            }
            if let Some(highlights) = &column.highlights {
                if highlights.len() != row_count {
                    return ValidationOutcome::Invalid(format!(
                        "column `{}` has {} highlight values for {row_count} categories",
                        column.source.query_name,
                        highlights.len()
                    ));
                }
            }
        }
    }

    ValidationOutcome::Valid
}

pub(super) fn validate_viewport(viewport: Viewport) -> ChartResult<Viewport> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

pub fn validate_settings(settings: &ChartSettings) -> ChartResult<()> {
    let padding = settings.category_axis.inner_padding;
    if !padding.is_finite() || !(0.0..=50.0).contains(&padding) {
        return Err(ChartError::InvalidSettings(
            "category-axis inner padding must be in [0, 50]".to_owned(),
        ));
    }

    let radius = settings.data_point.radius;
    if !radius.is_finite() || !(2.0..=10.0).contains(&radius) {
        return Err(ChartError::InvalidSettings(
            "data-point radius must be in [2, 10]".to_owned(),
        ));
    }

    if let Some(decimals) = settings.value_axis.decimal_places {
        if decimals > 5 {
            return Err(ChartError::InvalidSettings(
                "value-axis decimal places must be <= 5".to_owned(),
            ));
        }
    }

    for (name, value) in [
        ("category_axis.font_size", settings.category_axis.font_size),
        ("value_axis.font_size", settings.value_axis.font_size),
        ("data_labels.font_size", settings.data_labels.font_size),
        (
            "connecting_line.stroke_width",
            settings.connecting_line.stroke_width,
        ),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidSettings(format!(
                "`{name}` must be finite and > 0"
            )));
        }
    }

    for color in [
        settings.category_axis.color,
        settings.value_axis.color,
        settings.data_point.default_fill,
        settings.connecting_line.color,
        settings.data_labels.color,
    ] {
        color.validate()?;
    }

    Ok(())
}
