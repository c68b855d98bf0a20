use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use dumbbell_rs::api::{
    AxisSide, BASE_MARGIN_PX, CategoryAxisOrientation, ChartEngine, ChartEngineConfig,
    ChartSettings, SelectionSnapshot, ViewModel, ViewModelState, aggregate, compute_layout,
};
use dumbbell_rs::core::{
    CategoryColumn, ColumnMetadata, ColumnRoles, DataTable, DefaultValueFormatter, DisplayUnits,
    FontSpec, HeuristicTextMetrics, PaletteColorProvider, TextMetricsProvider, TextSize,
    ValueColumn, ValueGroup, Viewport,
};
use dumbbell_rs::render::NullRenderer;
use dumbbell_rs::{ChartError, ChartResult};

const VIEWPORT: Viewport = Viewport {
    width: 400,
    height: 300,
};

fn measure(series: &str, values: &[Option<f64>]) -> ValueGroup {
    let source = ColumnMetadata::new("Sales", "Sales")
        .with_roles(ColumnRoles::measure())
        .with_group_name(series);
    ValueGroup::new(
        Some(series.to_owned()),
        vec![ValueColumn::new(source, values.to_vec())],
    )
}

fn two_by_two() -> DataTable {
    DataTable::from_columns(
        CategoryColumn::new("Region", ["A", "B"]),
        vec![
            measure("2019", &[Some(6.0), Some(12.0)]),
            measure("2020", &[Some(14.0), Some(20.0)]),
        ],
    )
}

fn aggregated(table: &DataTable, settings: &ChartSettings) -> ViewModel {
    aggregate(
        table,
        settings,
        &SelectionSnapshot::default(),
        &mut PaletteColorProvider::default(),
        &DefaultValueFormatter,
    )
}

fn settings_with(orientation: CategoryAxisOrientation) -> ChartSettings {
    let mut settings = ChartSettings::default();
    settings.category_axis.orientation = orientation;
    settings
}

fn widest(texts: &[&str], font: &FontSpec) -> TextSize {
    texts.iter().fold(TextSize::default(), |acc, text| {
        acc.max(HeuristicTextMetrics.measure(text, font).expect("measure"))
    })
}

#[test]
fn left_orientation_margins_follow_measured_labels() {
    let settings = settings_with(CategoryAxisOrientation::Left);
    let view_model = aggregated(&two_by_two(), &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("layout");

    let category = widest(&["A", "B"], &settings.category_axis.font());
    let value = widest(&["6", "20"], &settings.value_axis.font());
    let margin = layout.margin;

    assert!(!layout.margin_fallback);
    assert_relative_eq!(margin.top, BASE_MARGIN_PX);
    assert_relative_eq!(margin.left, BASE_MARGIN_PX + category.width);
    assert_relative_eq!(margin.bottom, BASE_MARGIN_PX + value.height);
    assert_relative_eq!(margin.right, BASE_MARGIN_PX + value.width / 2.0);
    assert_eq!(layout.category_axis.tick_label_dimensions, category);
    assert_eq!(layout.value_axis.tick_label_dimensions, value);
}

#[test]
fn left_orientation_ranges_and_axis_placement() {
    let settings = settings_with(CategoryAxisOrientation::Left);
    let view_model = aggregated(&two_by_two(), &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("layout");
    let margin = layout.margin;
    let plot_width = 400.0 - margin.left - margin.right;
    let plot_height = 300.0 - margin.top - margin.bottom;

    let (category_start, category_end) = layout.category_axis.range();
    assert_relative_eq!(category_start, margin.top);
    assert_relative_eq!(category_end, 300.0 - margin.bottom);
    assert_eq!(layout.category_axis.side, AxisSide::Left);
    assert_relative_eq!(layout.category_axis.translate.x, margin.left);
    assert_relative_eq!(layout.category_axis.tick_size, -plot_width);
    assert_relative_eq!(layout.category_axis.scale.padding_inner(), 0.0);

    let (value_start, value_end) = layout.value_axis.range();
    assert_relative_eq!(value_start, margin.left);
    assert_relative_eq!(value_end, 400.0 - margin.right);
    assert_eq!(layout.value_axis.side, AxisSide::Bottom);
    assert_relative_eq!(layout.value_axis.translate.y, 300.0 - margin.bottom);
    assert_relative_eq!(layout.value_axis.tick_size, -plot_height);
}

#[test]
fn value_axis_is_niced_with_formatted_ticks() {
    let settings = ChartSettings::default();
    let view_model = aggregated(&two_by_two(), &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("layout");

    let axis = &layout.value_axis;
    assert_eq!(axis.domain(), (5.0, 20.0));
    let values: Vec<f64> = axis.ticks.iter().map(|tick| tick.value).collect();
    assert_eq!(values, [5.0, 10.0, 15.0, 20.0]);
    let labels: Vec<&str> = axis.ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, ["5", "10", "15", "20"]);
    assert_relative_eq!(axis.ticks[0].coordinate, layout.margin.left);
    assert_relative_eq!(axis.ticks[3].coordinate, 400.0 - layout.margin.right);
    assert_eq!(axis.display_units, DisplayUnits::None);
}

#[test]
fn fixed_decimal_places_and_auto_units_shape_axis_labels() {
    let mut settings = ChartSettings::default();
    settings.value_axis.decimal_places = Some(2);
    let view_model = aggregated(&two_by_two(), &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("layout");
    assert_eq!(layout.value_axis.ticks[0].label, "5.00");

    let large = DataTable::from_columns(
        CategoryColumn::new("Region", ["A", "B"]),
        vec![measure("2019", &[Some(1_200_000.0), Some(2_900_000.0)])],
    );
    let settings = ChartSettings::default();
    let view_model = aggregated(&large, &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("layout");
    assert_eq!(layout.value_axis.display_units, DisplayUnits::Millions);
    assert!(layout.value_axis.ticks.iter().all(|tick| tick.label.ends_with('M')));
}

#[test]
fn orientation_swap_keeps_data_and_swaps_ranges() {
    let left_settings = settings_with(CategoryAxisOrientation::Left);
    let bottom_settings = settings_with(CategoryAxisOrientation::Bottom);
    let left_model = aggregated(&two_by_two(), &left_settings);
    let bottom_model = aggregated(&two_by_two(), &bottom_settings);

    assert_eq!(left_model.min_value, bottom_model.min_value);
    assert_eq!(left_model.max_value, bottom_model.max_value);
    assert_eq!(left_model.categories, bottom_model.categories);

    let left = compute_layout(
        &left_model,
        &left_settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("left layout");
    let bottom = compute_layout(
        &bottom_model,
        &bottom_settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("bottom layout");

    assert_eq!(left.category_axis.domain(), bottom.category_axis.domain());
    assert_eq!(left.value_axis.domain(), bottom.value_axis.domain());

    assert_eq!(bottom.category_axis.side, AxisSide::Bottom);
    assert_eq!(bottom.value_axis.side, AxisSide::Left);
    let (category_start, category_end) = bottom.category_axis.range();
    assert_relative_eq!(category_start, bottom.margin.left);
    assert_relative_eq!(category_end, 400.0 - bottom.margin.right);
    let (value_start, value_end) = bottom.value_axis.range();
    assert_relative_eq!(value_start, 300.0 - bottom.margin.bottom);
    assert_relative_eq!(value_end, bottom.margin.top);
    assert!(value_start > value_end);
    assert_relative_eq!(bottom.category_axis.scale.padding_inner(), 0.2);
}

#[test]
fn bottom_orientation_margins_have_no_right_reserve() {
    let settings = settings_with(CategoryAxisOrientation::Bottom);
    let view_model = aggregated(&two_by_two(), &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("layout");

    let category = widest(&["A", "B"], &settings.category_axis.font());
    let value = widest(&["6", "20"], &settings.value_axis.font());
    assert_relative_eq!(layout.margin.right, BASE_MARGIN_PX);
    assert_relative_eq!(layout.margin.bottom, BASE_MARGIN_PX + category.height);
    assert_relative_eq!(layout.margin.left, BASE_MARGIN_PX + value.width);
}

#[test]
fn degenerate_domain_maps_to_range_middle() {
    let table = DataTable::from_columns(
        CategoryColumn::new("Region", ["A"]),
        vec![measure("2019", &[Some(5.0)]), measure("2020", &[Some(5.0)])],
    );
    let settings = ChartSettings::default();
    let view_model = aggregated(&table, &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &HeuristicTextMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("degenerate layout");

    assert_eq!(layout.value_axis.domain(), (5.0, 5.0));
    assert_eq!(layout.value_axis.ticks.len(), 1);
    let (start, end) = layout.value_axis.range();
    assert_relative_eq!(layout.value_axis.ticks[0].coordinate, (start + end) / 2.0);
}

struct FailingMetrics;

impl TextMetricsProvider for FailingMetrics {
    fn measure(&self, _text: &str, _font: &FontSpec) -> ChartResult<TextSize> {
        Err(ChartError::MeasurementUnavailable("no font backend".to_owned()))
    }
}

#[test]
fn measurement_failure_without_history_uses_base_margin() {
    let settings = ChartSettings::default();
    let view_model = aggregated(&two_by_two(), &settings);
    let layout = compute_layout(
        &view_model,
        &settings,
        VIEWPORT,
        &FailingMetrics,
        &DefaultValueFormatter,
        None,
    )
    .expect("fallback layout");

    assert!(layout.margin_fallback);
    assert_relative_eq!(layout.margin.left, BASE_MARGIN_PX);
    assert_relative_eq!(layout.margin.bottom, BASE_MARGIN_PX);
    assert_eq!(layout.value_axis.ticks.len(), 4);
}

#[derive(Clone)]
struct ToggleMetrics {
    failing: Rc<Cell<bool>>,
}

impl TextMetricsProvider for ToggleMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextSize> {
        if self.failing.get() {
            return Err(ChartError::MeasurementUnavailable("backend lost".to_owned()));
        }
        HeuristicTextMetrics.measure(text, font)
    }
}

#[test]
fn measurement_failure_reuses_previous_margin() {
    let failing = Rc::new(Cell::new(false));
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(VIEWPORT))
        .expect("engine init")
        .with_text_metrics(ToggleMetrics {
            failing: Rc::clone(&failing),
        });
    engine.update(two_by_two(), VIEWPORT).expect("update");
    let measured = engine.view_model().margin().expect("margin");

    failing.set(true);
    engine.resize(Viewport::new(500, 350)).expect("resize");
    let layout = engine.view_model().layout.as_ref().expect("layout");
    assert!(layout.margin_fallback);
    assert_eq!(layout.margin, measured);
    assert_eq!(layout.viewport, Viewport::new(500, 350));

    engine.update(two_by_two(), VIEWPORT).expect("rebuild");
    assert_eq!(engine.view_model().margin(), Some(measured));

    failing.set(false);
    engine.update(two_by_two(), VIEWPORT).expect("recovered");
    assert!(!engine.view_model().layout.as_ref().expect("layout").margin_fallback);
}

struct BrokenMetrics;

impl TextMetricsProvider for BrokenMetrics {
    fn measure(&self, _text: &str, _font: &FontSpec) -> ChartResult<TextSize> {
        Err(ChartError::InvalidData("corrupt font table".to_owned()))
    }
}

#[test]
fn other_measurement_errors_propagate_and_invalidate() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(VIEWPORT))
        .expect("engine init")
        .with_text_metrics(BrokenMetrics);

    let result = engine.update(two_by_two(), VIEWPORT);
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(engine.state(), ViewModelState::Invalid);
}

#[test]
fn resize_reruns_layout_without_rebuilding_entities() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(VIEWPORT))
        .expect("engine init");
    engine.update(two_by_two(), VIEWPORT).expect("update");
    let categories = engine.view_model().categories.clone();
    let (_, old_end) = engine.view_model().value_axis().expect("axis").range();

    engine.resize(Viewport::new(800, 300)).expect("resize");
    let (_, new_end) = engine.view_model().value_axis().expect("axis").range();

    assert_eq!(engine.view_model().categories, categories);
    assert_relative_eq!(new_end - old_end, 400.0);
    assert_eq!(engine.viewport(), Viewport::new(800, 300));
}

#[test]
fn changing_orientation_setting_rebuilds_layout() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(VIEWPORT))
        .expect("engine init");
    engine.update(two_by_two(), VIEWPORT).expect("update");
    assert_eq!(
        engine.view_model().category_axis().expect("axis").side,
        AxisSide::Left
    );

    engine
        .set_settings(settings_with(CategoryAxisOrientation::Bottom))
        .expect("settings");
    assert_eq!(
        engine.view_model().category_axis().expect("axis").side,
        AxisSide::Bottom
    );
    assert_eq!(engine.state(), ViewModelState::ValidLaidout);
}
