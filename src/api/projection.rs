use serde::{Deserialize, Serialize};

use crate::core::{Color, EntityIdentity};
use crate::error::{ChartError, ChartResult};

use super::view_model::ViewModel;
use super::{CategoryAxisOrientation, ChartSettings};

/// Pixel geometry for one dumbbell endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumbbellPoint {
    pub identity: EntityIdentity,
    pub group_name: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
    pub dimmed: bool,
    pub emphasized: bool,
    /// Formatted value, present only when data labels are shown.
    pub label: Option<String>,
}

/// Line joining the category minimum to its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DumbbellConnector {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumbbellGeometry {
    pub category: EntityIdentity,
    pub name: String,
    /// Band center on the category axis.
    pub center: f64,
    pub connector: DumbbellConnector,
    pub points: Vec<DumbbellPoint>,
}

/// Projects every category of a laid-out view model into pixel space.
///
/// With a `Left` category axis categories run down the y axis and values
/// along x; `Bottom` swaps the two.
pub fn project_dumbbells(
    view_model: &ViewModel,
    settings: &ChartSettings,
) -> ChartResult<Vec<DumbbellGeometry>> {
    let Some(layout) = view_model.layout.as_ref() else {
        return Err(ChartError::InvalidData(
            "cannot project a view model without layout".to_owned(),
        ));
    };
    let band_scale = &layout.category_axis.scale;
    let value_scale = layout.value_axis.scale;
    let to_xy = |center: f64, value_px: f64| match layout.orientation {
        CategoryAxisOrientation::Left => (value_px, center),
        CategoryAxisOrientation::Bottom => (center, value_px),
    };

    let mut geometries = Vec::with_capacity(view_model.categories.len());
    for (index, category) in view_model.categories.iter().enumerate() {
        let center = band_scale.center(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "category `{}` is missing from the band domain",
                category.name
            ))
        })?;

        let mut points = Vec::with_capacity(category.groups.len());
        for group in &category.groups {
            let (x, y) = to_xy(center, value_scale.map(group.value)?);
            points.push(DumbbellPoint {
                identity: group.identity.clone(),
                group_name: group.name.clone(),
                x,
                y,
                radius: settings.data_point.radius,
                color: group.color,
                dimmed: view_model.should_dim(group),
                emphasized: view_model.should_emphasize(group),
                label: settings
                    .data_labels
                    .show
                    .then(|| group.formatted_value.clone()),
            });
        }

        let (x1, y1) = to_xy(center, value_scale.map(category.min)?);
        let (x2, y2) = to_xy(center, value_scale.map(category.max)?);
        let dimmed = view_model.should_dim(category) && points.iter().all(|point| point.dimmed);

        geometries.push(DumbbellGeometry {
            category: category.identity.clone(),
            name: category.name.clone(),
            center,
            connector: DumbbellConnector {
                x1,
                y1,
                x2,
                y2,
                dimmed,
            },
            points,
        });
    }
    Ok(geometries)
}
