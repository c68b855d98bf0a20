use tracing::{debug, warn};

use crate::core::{
    BandScale, DisplayUnits, FormatOptions, LinearScale, Margin, TextMetricsProvider, TextSize,
    ValueFormatter, Viewport, precision_from_step,
};
use crate::error::{ChartError, ChartResult};

use super::validation::validate_viewport;
use super::view_model::{
    AxisSide, AxisTick, AxisTranslate, CategoryAxis, ChartLayout, ValueAxis, ViewModel,
};
use super::{CategoryAxisOrientation, ChartSettings};

/// Pad applied on every side before label space is added.
pub const BASE_MARGIN_PX: f64 = 10.0;
pub const VALUE_AXIS_TICK_COUNT: usize = 3;

/// Largest rendered label per axis, from the measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelMeasurements {
    pub category: TextSize,
    pub value: TextSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisKind {
    Category,
    Value,
}

/// Formats value-axis labels with the resolved units and precision.
struct ValueLabelFormat<'a> {
    formatter: &'a dyn ValueFormatter,
    format_string: &'a str,
    display_units: DisplayUnits,
    precision: u8,
    settings: &'a ChartSettings,
}

impl ValueLabelFormat<'_> {
    fn format(&self, value: f64) -> String {
        self.formatter.format(
            value,
            &FormatOptions {
                format_string: Some(self.format_string),
                display_units: self.display_units,
                precision: Some(self.precision),
                locale: self.settings.locale,
            },
        )
    }
}

/// Niced value scale over `[min_value, max_value]`; the range is filled in
/// once margins are known.
fn niced_value_scale(view_model: &ViewModel) -> ChartResult<LinearScale> {
    Ok(LinearScale::new(view_model.min_value, view_model.max_value)?.nice(VALUE_AXIS_TICK_COUNT))
}

fn value_label_format<'a>(
    view_model: &'a ViewModel,
    settings: &'a ChartSettings,
    formatter: &'a dyn ValueFormatter,
    scale: LinearScale,
) -> ValueLabelFormat<'a> {
    let (start, end) = scale.domain();
    let display_units = settings
        .value_axis
        .display_units
        .resolve(start.abs().max(end.abs()));
    let precision = settings.value_axis.decimal_places.unwrap_or_else(|| {
        let step = scale.tick_step(VALUE_AXIS_TICK_COUNT) / display_units.divisor();
        precision_from_step(step).min(5) as u8
    });
    ValueLabelFormat {
        formatter,
        format_string: &view_model.primary_format_string,
        display_units,
        precision,
        settings,
    }
}

/// First pass: measures every category name and the formatted extrema.
///
/// Label sizes depend only on content and font, never on the axis range.
pub fn measure_labels(
    view_model: &ViewModel,
    settings: &ChartSettings,
    metrics: &dyn TextMetricsProvider,
    formatter: &dyn ValueFormatter,
) -> ChartResult<LabelMeasurements> {
    let category_font = settings.category_axis.font();
    let mut category = TextSize::default();
    for entry in &view_model.categories {
        category = category.max(metrics.measure(&entry.name, &category_font)?);
    }

    let scale = niced_value_scale(view_model)?;
    let labels = value_label_format(view_model, settings, formatter, scale);
    let value_font = settings.value_axis.font();
    let min_label = metrics.measure(&labels.format(view_model.min_value), &value_font)?;
    let max_label = metrics.measure(&labels.format(view_model.max_value), &value_font)?;

    Ok(LabelMeasurements {
        category,
        value: min_label.max(max_label),
    })
}

/// Second pass: grows the base margin by the space labels need.
#[must_use]
pub fn derive_margin(
    measurements: LabelMeasurements,
    orientation: CategoryAxisOrientation,
) -> Margin {
    let mut margin = Margin::uniform(BASE_MARGIN_PX);
    match orientation {
        CategoryAxisOrientation::Left => {
            margin.bottom += measurements.value.height;
            margin.left += measurements.category.width;
            // Room for a value label overflowing the last tick.
            margin.right += measurements.value.width / 2.0;
        }
        CategoryAxisOrientation::Bottom => {
            margin.bottom += measurements.category.height;
            margin.left += measurements.value.width;
        }
    }
    margin
}

fn axis_placement(
    axis: AxisKind,
    orientation: CategoryAxisOrientation,
    margin: Margin,
    viewport: Viewport,
) -> (AxisSide, AxisTranslate, f64) {
    let plot_width = (viewport.width_px() - margin.horizontal()).max(0.0);
    let plot_height = (viewport.height_px() - margin.vertical()).max(0.0);
    let left = AxisTranslate {
        x: margin.left,
        y: 0.0,
    };
    let bottom = AxisTranslate {
        x: 0.0,
        y: viewport.height_px() - margin.bottom,
    };

    match (axis, orientation) {
        (AxisKind::Category, CategoryAxisOrientation::Left) => (AxisSide::Left, left, -plot_width),
        (AxisKind::Category, CategoryAxisOrientation::Bottom) => {
            (AxisSide::Bottom, bottom, -plot_height)
        }
        (AxisKind::Value, CategoryAxisOrientation::Left) => {
            (AxisSide::Bottom, bottom, -plot_height)
        }
        (AxisKind::Value, CategoryAxisOrientation::Bottom) => (AxisSide::Left, left, -plot_width),
    }
}

/// Computes margins, axis ranges and scales for `view_model`.
///
/// When text measurement fails the margin of `previous` (or the base margin
/// when there is none) is reused and `margin_fallback` is set.
pub fn compute_layout(
    view_model: &ViewModel,
    settings: &ChartSettings,
    viewport: Viewport,
    metrics: &dyn TextMetricsProvider,
    formatter: &dyn ValueFormatter,
    previous: Option<&ChartLayout>,
) -> ChartResult<ChartLayout> {
    let viewport = validate_viewport(viewport)?;
    let orientation = settings.category_axis.orientation;

    let (margin, measurements, margin_fallback) =
        match measure_labels(view_model, settings, metrics, formatter) {
            Ok(measurements) => (derive_margin(measurements, orientation), measurements, false),
            Err(err @ ChartError::MeasurementUnavailable(_)) => {
                warn!(error = %err, "text measurement failed; reusing previous margin");
                let margin = previous.map_or(Margin::uniform(BASE_MARGIN_PX), |layout| {
                    layout.margin
                });
                let measurements = previous.map_or_else(LabelMeasurements::default, |layout| {
                    LabelMeasurements {
                        category: layout.category_axis.tick_label_dimensions,
                        value: layout.value_axis.tick_label_dimensions,
                    }
                });
                (margin, measurements, true)
            }
            Err(err) => return Err(err),
        };

    let plot_left = margin.left;
    let plot_right = (viewport.width_px() - margin.right).max(plot_left);
    let plot_top = margin.top;
    let plot_bottom = (viewport.height_px() - margin.bottom).max(plot_top);
    let (category_range, value_range) = match orientation {
        CategoryAxisOrientation::Left => ((plot_top, plot_bottom), (plot_left, plot_right)),
        CategoryAxisOrientation::Bottom => ((plot_left, plot_right), (plot_bottom, plot_top)),
    };

    let domain = view_model
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect();
    let band_scale = BandScale::new(
        domain,
        category_range.0,
        category_range.1,
        settings.effective_inner_padding(),
    )?;
    let (category_side, category_translate, category_tick_size) =
        axis_placement(AxisKind::Category, orientation, margin, viewport);

    let value_scale = niced_value_scale(view_model)?.with_range(value_range.0, value_range.1)?;
    let labels = value_label_format(view_model, settings, formatter, value_scale);
    let mut ticks = Vec::with_capacity(VALUE_AXIS_TICK_COUNT + 1);
    for value in value_scale.ticks(VALUE_AXIS_TICK_COUNT) {
        ticks.push(AxisTick {
            value,
            label: labels.format(value),
            coordinate: value_scale.map(value)?,
        });
    }
    let (value_side, value_translate, value_tick_size) =
        axis_placement(AxisKind::Value, orientation, margin, viewport);

    debug!(
        ?orientation,
        margin_top = margin.top,
        margin_right = margin.right,
        margin_bottom = margin.bottom,
        margin_left = margin.left,
        margin_fallback,
        "computed layout"
    );

    Ok(ChartLayout {
        viewport,
        orientation,
        margin,
        margin_fallback,
        category_axis: CategoryAxis {
            side: category_side,
            scale: band_scale,
            translate: category_translate,
            tick_size: category_tick_size,
            tick_label_dimensions: measurements.category,
            font: settings.category_axis.font(),
            color: settings.category_axis.color,
        },
        value_axis: ValueAxis {
            side: value_side,
            scale: value_scale,
            tick_count: VALUE_AXIS_TICK_COUNT,
            ticks,
            translate: value_translate,
            tick_size: value_tick_size,
            tick_label_dimensions: measurements.value,
            display_units: labels.display_units,
            font: settings.value_axis.font(),
            color: settings.value_axis.color,
        },
    })
}
