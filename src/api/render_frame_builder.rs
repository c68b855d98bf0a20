use crate::core::{Color, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

use super::projection::project_dumbbells;
use super::view_model::{AxisSide, AxisTranslate, ViewModel};
use super::{CategoryAxisOrientation, ChartSettings};

pub const DIMMED_OPACITY: f64 = 0.4;
pub const GRIDLINE_OPACITY: f64 = 0.3;
pub const GRIDLINE_WIDTH_PX: f64 = 1.0;
const LABEL_GAP_PX: f64 = 4.0;

fn faded(color: Color, dimmed: bool) -> Color {
    if dimmed {
        color.with_alpha(color.alpha * DIMMED_OPACITY)
    } else {
        color
    }
}

fn gridline(
    side: AxisSide,
    translate: AxisTranslate,
    tick_size: f64,
    at: f64,
    color: Color,
) -> LinePrimitive {
    match side {
        AxisSide::Left => LinePrimitive::gridline(
            translate.x,
            at,
            translate.x - tick_size,
            at,
            GRIDLINE_WIDTH_PX,
            color,
        ),
        AxisSide::Bottom => LinePrimitive::gridline(
            at,
            translate.y,
            at,
            translate.y + tick_size,
            GRIDLINE_WIDTH_PX,
            color,
        ),
    }
}

// Tick and category labels hang off the outer edge of their axis.
fn axis_label_anchor(
    side: AxisSide,
    translate: AxisTranslate,
    at: f64,
) -> (f64, f64, TextHAlign, TextVAlign) {
    match side {
        AxisSide::Left => (
            translate.x - LABEL_GAP_PX,
            at,
            TextHAlign::Right,
            TextVAlign::Middle,
        ),
        AxisSide::Bottom => (
            at,
            translate.y + LABEL_GAP_PX,
            TextHAlign::Center,
            TextVAlign::Top,
        ),
    }
}

/// Materializes the draw commands for `view_model`.
///
/// Models that are invalid or not laid out produce an empty frame.
pub fn build_render_frame(
    view_model: &ViewModel,
    settings: &ChartSettings,
    viewport: Viewport,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(viewport);
    let Some(layout) = view_model.layout.as_ref().filter(|_| view_model.is_valid) else {
        return Ok(frame);
    };

    let value_axis = &layout.value_axis;
    let value_grid_color = value_axis.color.with_alpha(GRIDLINE_OPACITY);
    for tick in &value_axis.ticks {
        frame.lines.push(gridline(
            value_axis.side,
            value_axis.translate,
            value_axis.tick_size,
            tick.coordinate,
            value_grid_color,
        ));
        if tick.label.is_empty() {
            continue;
        }
        let (x, y, h_align, v_align) =
            axis_label_anchor(value_axis.side, value_axis.translate, tick.coordinate);
        frame.texts.push(
            TextPrimitive::new(tick.label.as_str(), x, y, &value_axis.font, value_axis.color)
                .aligned(h_align, v_align),
        );
    }

    let category_axis = &layout.category_axis;
    let category_grid_color = category_axis.color.with_alpha(GRIDLINE_OPACITY);
    let geometries = project_dumbbells(view_model, settings)?;
    for geometry in &geometries {
        frame.lines.push(gridline(
            category_axis.side,
            category_axis.translate,
            category_axis.tick_size,
            geometry.center,
            category_grid_color,
        ));
        if geometry.name.is_empty() {
            continue;
        }
        let (x, y, h_align, v_align) =
            axis_label_anchor(category_axis.side, category_axis.translate, geometry.center);
        frame.texts.push(
            TextPrimitive::new(
                geometry.name.as_str(),
                x,
                y,
                &category_axis.font,
                category_axis.color,
            )
            .aligned(h_align, v_align),
        );
    }

    let connecting = settings.connecting_line;
    frame.lines.extend(geometries.iter().map(|geometry| {
        let connector = geometry.connector;
        LinePrimitive::connector(
            connector.x1,
            connector.y1,
            connector.x2,
            connector.y2,
            connecting.stroke_width,
            faded(connecting.color, connector.dimmed),
        )
    }));

    let label_font = settings.data_labels.font();
    for point in geometries.iter().flat_map(|geometry| &geometry.points) {
        frame.circles.push(CirclePrimitive::new(
            point.x,
            point.y,
            point.radius,
            faded(point.color, point.dimmed),
        ));

        let Some(label) = point.label.as_deref().filter(|label| !label.is_empty()) else {
            continue;
        };
        let text = match layout.orientation {
            // Above the dot, its bottom edge one gap clear of the circle.
            CategoryAxisOrientation::Left => TextPrimitive::new(
                label,
                point.x,
                point.y - point.radius - LABEL_GAP_PX - label_font.size_px,
                &label_font,
                settings.data_labels.color,
            )
            .aligned(TextHAlign::Center, TextVAlign::Top),
            CategoryAxisOrientation::Bottom => TextPrimitive::new(
                label,
                point.x + point.radius + LABEL_GAP_PX,
                point.y,
                &label_font,
                settings.data_labels.color,
            )
            .aligned(TextHAlign::Left, TextVAlign::Middle),
        };
        frame.texts.push(text);
    }

    Ok(frame)
}
