use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::core::{
    Color, ColorProvider, DataTable, DisplayUnits, EntityIdentity, FormatOptions, ValueColumn,
    ValueFormatter,
};

use super::validation::{ValidationOutcome, validate_data_table};
use super::view_model::{Category, Group, TooltipEntry, TooltipPayload, ViewModel};
use super::{ChartSettings, SelectionSnapshot};

pub const HIGHLIGHTED_TOOLTIP_LABEL: &str = "Highlighted";
pub const BLANK_VALUE_LABEL: &str = "(Blank)";

/// Per-group facts resolved once before walking the rows.
struct SeriesContext<'a> {
    name: String,
    series_key: Option<&'a str>,
    measure: &'a ValueColumn,
    tooltips: Vec<&'a ValueColumn>,
    color: Color,
    format: String,
}

/// Walks the data table once and produces the category/group graph with
/// extrema, formatted values, identities and tooltips, then carries the
/// prior selection over.
///
/// Rejected input yields an invalid view model; this never fails.
pub fn aggregate(
    table: &DataTable,
    settings: &ChartSettings,
    prior_selection: &SelectionSnapshot,
    colors: &mut dyn ColorProvider,
    formatter: &dyn ValueFormatter,
) -> ViewModel {
    if let ValidationOutcome::Invalid(reason) = validate_data_table(table) {
        debug!(%reason, "rejected data table");
        return ViewModel::invalid(reason);
    }

    let has_highlights = table.groups.iter().any(|group| {
        group
            .measure_column()
            .is_some_and(|column| column.highlights.is_some())
    });
    let primary_format_string = table
        .metadata
        .iter()
        .find(|column| column.roles.measure && column.group_name.is_none())
        .and_then(|column| column.format.clone())
        .unwrap_or_else(|| settings.data_point.default_format.clone());

    let series: Vec<SeriesContext<'_>> = table
        .groups
        .iter()
        .filter_map(|group| {
            let measure = group.measure_column()?;
            let name = group
                .name
                .clone()
                .unwrap_or_else(|| measure.source.display_name.clone());
            let color = match (group.overrides.fill, group.name.as_deref()) {
                (Some(fill), _) => fill,
                (None, Some(series_name)) => colors.color_for(series_name),
                (None, None) => settings.data_point.default_fill,
            };
            let format = group
                .overrides
                .format
                .clone()
                .or_else(|| measure.source.format.clone())
                .unwrap_or_else(|| primary_format_string.clone());
            Some(SeriesContext {
                name,
                series_key: group.name.as_deref(),
                measure,
                tooltips: group.tooltip_columns().collect(),
                color,
                format,
            })
        })
        .collect();

    let format_value = |value: f64, format: &str| {
        formatter.format(
            value,
            &FormatOptions {
                format_string: Some(format),
                display_units: DisplayUnits::None,
                precision: None,
                locale: settings.locale,
            },
        )
    };

    let category_column = &table.categories[0];
    let mut distinct: IndexMap<String, Group> = IndexMap::with_capacity(series.len());
    let mut categories = Vec::with_capacity(category_column.values.len());
    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;

    for (row, category_name) in category_column.values.iter().enumerate() {
        let mut groups = Vec::with_capacity(series.len());
        let mut category_min = f64::INFINITY;
        let mut category_max = f64::NEG_INFINITY;

        for context in &series {
            let Some(value) = context.measure.values[row].filter(|value| value.is_finite())
            else {
                continue;
            };
            let highlighted_value = context
                .measure
                .highlights
                .as_ref()
                .and_then(|highlights| highlights[row]);
            let highlighted = has_highlights && highlighted_value.is_some();
            let formatted_value = format_value(value, &context.format);

            let mut tooltip = TooltipPayload::new();
            tooltip.push(TooltipEntry {
                display_name: context.name.clone(),
                value: formatted_value.clone(),
                color: context.color,
            });
            if let (true, Some(highlight)) = (highlighted, highlighted_value) {
                tooltip.push(TooltipEntry {
                    display_name: HIGHLIGHTED_TOOLTIP_LABEL.to_owned(),
                    value: format_value(highlight, &context.format),
                    color: context.color,
                });
            }
            for column in &context.tooltips {
                let format = column.source.format.as_deref().unwrap_or(&context.format);
                tooltip.push(TooltipEntry {
                    display_name: column.source.display_name.clone(),
                    value: column.values[row].map_or_else(
                        || BLANK_VALUE_LABEL.to_owned(),
                        |extra| format_value(extra, format),
                    ),
                    color: context.color,
                });
            }

            category_min = category_min.min(value);
            category_max = category_max.max(value);

            let group = Group {
                name: context.name.clone(),
                color: context.color,
                identity: EntityIdentity::data_point(
                    row,
                    context.series_key,
                    &context.measure.source.query_name,
                ),
                value,
                formatted_value,
                highlighted_value,
                highlighted,
                selected: false,
                tooltip,
            };
            if let Entry::Vacant(slot) = distinct.entry(context.name.clone()) {
                slot.insert(Group {
                    identity: EntityIdentity::series(
                        context.series_key,
                        &context.measure.source.query_name,
                    ),
                    ..group.clone()
                });
            }
            groups.push(group);
        }

        if groups.is_empty() {
            trace!(row, category = %category_name, "skipping category without values");
            continue;
        }

        min_value = min_value.min(category_min);
        max_value = max_value.max(category_max);
        categories.push(Category {
            name: category_name.clone(),
            identity: EntityIdentity::category(row),
            min: category_min,
            max: category_max,
            selected: false,
            highlighted: has_highlights && groups.iter().all(|group| group.highlighted),
            groups,
        });
    }

    if categories.is_empty() {
        debug!("rejected data table without numeric values");
        return ViewModel::invalid("no numeric values to plot");
    }
    if !(max_value - min_value).is_finite() {
        debug!(min_value, max_value, "rejected value range that overflows");
        return ViewModel::invalid(format!(
            "value range [{min_value}, {max_value}] is too wide to plot"
        ));
    }

    let mut view_model = ViewModel {
        is_valid: true,
        invalid_reason: None,
        primary_format_string,
        groups: distinct.into_values().collect(),
        categories,
        min_value,
        max_value,
        has_selection: false,
        has_highlights,
        layout: None,
    };
    prior_selection.reconcile(&mut view_model);

    debug!(
        categories = view_model.categories.len(),
        groups = view_model.groups.len(),
        min_value,
        max_value,
        has_highlights,
        has_selection = view_model.has_selection,
        "aggregated data table"
    );
    view_model
}
