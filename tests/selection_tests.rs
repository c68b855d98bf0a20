use dumbbell_rs::api::{
    ChartEngine, ChartEngineConfig, SelectionSnapshot, ViewModel, project_dumbbells,
};
use dumbbell_rs::core::{
    CategoryColumn, ColumnMetadata, ColumnRoles, DataTable, EntityIdentity, ValueColumn,
    ValueGroup, Viewport,
};
use dumbbell_rs::interaction::{SelectionRequest, apply_selection_request};
use dumbbell_rs::render::NullRenderer;

const VIEWPORT: Viewport = Viewport {
    width: 640,
    height: 480,
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

fn table() -> DataTable {
    DataTable::from_columns(
        CategoryColumn::new("Region", ["A", "B", "C"]),
        vec![
            measure("2019", &[Some(6.0), Some(12.0), Some(3.0)]),
            measure("2020", &[Some(14.0), Some(20.0), Some(9.0)]),
        ],
    )
}

fn engine() -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(VIEWPORT))
        .expect("engine init");
    engine.update(table(), VIEWPORT).expect("update");
    engine
}

fn selected_flags(view_model: &ViewModel) -> Vec<bool> {
    view_model
        .selectable_entities()
        .iter()
        .map(|entity| entity.is_selected())
        .collect()
}

#[test]
fn selection_survives_rebuild_with_identical_data() {
    let mut engine = engine();
    let target = EntityIdentity::data_point(1, Some("2020"), "Sales");

    let selected = engine.apply_selection(&SelectionRequest::select(target.clone()));
    assert_eq!(selected, vec![target.clone()]);
    let before = selected_flags(engine.view_model());

    engine.update(table(), VIEWPORT).expect("rebuild");

    let view_model = engine.view_model();
    assert!(view_model.has_selection);
    assert!(view_model.categories[1].groups[1].selected);
    assert_eq!(selected_flags(view_model), before);
    assert_eq!(view_model.selected_identities(), vec![target]);
}

#[test]
fn repeated_rebuilds_are_idempotent() {
    let mut engine = engine();
    engine.apply_selection(&SelectionRequest::select(EntityIdentity::category(2)));
    engine.update(table(), VIEWPORT).expect("first rebuild");
    let once = engine.view_model().clone();
    engine.update(table(), VIEWPORT).expect("second rebuild");

    assert_eq!(engine.view_model(), &once);
}

#[test]
fn selection_survives_resize() {
    let mut engine = engine();
    engine.apply_selection(&SelectionRequest::select(EntityIdentity::category(0)));
    engine.resize(Viewport::new(300, 200)).expect("resize");

    assert!(engine.view_model().categories[0].selected);
    let layout = engine.view_model().layout.as_ref().expect("laid out");
    assert_eq!(layout.viewport, Viewport::new(300, 200));
}

#[test]
fn unselected_entities_dim_while_selected_ones_emphasize() {
    let mut engine = engine();
    engine.apply_selection(&SelectionRequest::select(EntityIdentity::category(0)));

    let view_model = engine.view_model();
    assert!(engine.should_emphasize(&view_model.categories[0]));
    assert!(!engine.should_dim(&view_model.categories[0]));
    assert!(engine.should_dim(&view_model.categories[1]));
    assert!(engine.should_dim(&view_model.categories[1].groups[0]));
}

#[test]
fn selecting_a_category_selects_its_points() {
    let mut engine = engine();
    let selected = engine.apply_selection(&SelectionRequest::select(EntityIdentity::category(0)));
    assert_eq!(selected, vec![EntityIdentity::category(0)]);

    let view_model = engine.view_model();
    let geometry = project_dumbbells(view_model, engine.settings()).expect("project");
    assert!(geometry[0].points.iter().all(|point| !point.dimmed && point.emphasized));
    assert!(!geometry[0].connector.dimmed);
    assert!(geometry[1].points.iter().all(|point| point.dimmed));
    assert!(geometry[1].connector.dimmed);

    engine.update(table(), VIEWPORT).expect("rebuild");
    assert!(engine.view_model().categories[0].groups.iter().all(|group| group.selected));
    assert_eq!(
        engine.view_model().selected_identities(),
        vec![EntityIdentity::category(0)]
    );
}

#[test]
fn selecting_a_legend_entry_selects_that_series_everywhere() {
    let mut engine = engine();
    let series = engine.view_model().groups[0].identity.clone();
    engine.apply_selection(&SelectionRequest::select(series.clone()));

    let geometry = project_dumbbells(engine.view_model(), engine.settings()).expect("project");
    for dumbbell in &geometry {
        for point in &dumbbell.points {
            assert_eq!(point.dimmed, point.group_name != "2019", "{}", point.group_name);
        }
        assert!(!dumbbell.connector.dimmed);
    }

    let snapshot = SelectionSnapshot::from_identities([series.clone()]);
    engine
        .update_with_selection(table(), VIEWPORT, &snapshot)
        .expect("rebuild");
    let view_model = engine.view_model();
    assert!(view_model.groups[0].selected);
    assert!(
        view_model
            .categories
            .iter()
            .all(|category| category.groups[0].selected && !category.groups[1].selected)
    );
    assert_eq!(view_model.selected_identities(), vec![series]);
}

#[test]
fn clearing_selection_stops_all_dimming() {
    let mut engine = engine();
    engine.apply_selection(&SelectionRequest::select(EntityIdentity::category(0)));
    engine.apply_selection(&SelectionRequest::toggle(EntityIdentity::category(2)));
    engine.clear_selection();

    assert!(!engine.view_model().has_selection);
    for entity in engine.selectable_entities() {
        assert!(!entity.is_selected());
        assert!(!engine.should_dim(entity));
    }

    engine.update(table(), VIEWPORT).expect("rebuild");
    assert!(!engine.view_model().has_selection);
}

#[test]
fn plain_click_replaces_and_multi_click_toggles() {
    let mut engine = engine();
    let a = EntityIdentity::category(0);
    let b = EntityIdentity::category(1);

    engine.apply_selection(&SelectionRequest::select(a.clone()));
    let both = engine.apply_selection(&SelectionRequest::toggle(b.clone()));
    assert_eq!(both, vec![a.clone(), b.clone()]);

    let only_b = engine.apply_selection(&SelectionRequest::toggle(a.clone()));
    assert_eq!(only_b, vec![b.clone()]);

    let only_a = engine.apply_selection(&SelectionRequest::select(a.clone()));
    assert_eq!(only_a, vec![a]);
}

#[test]
fn clicking_the_only_selected_entity_clears_it() {
    let mut engine = engine();
    let series = EntityIdentity::series(Some("2019"), "Sales");

    engine.apply_selection(&SelectionRequest::select(series.clone()));
    assert!(engine.view_model().groups[0].selected);

    let after = engine.apply_selection(&SelectionRequest::select(series));
    assert!(after.is_empty());
    assert!(!engine.view_model().has_selection);
}

#[test]
fn back_channel_does_not_touch_other_view_models() {
    let engine = engine();
    let mut copy = engine.view_model().clone();
    apply_selection_request(
        &mut copy,
        &SelectionRequest::select(EntityIdentity::category(1)),
    );

    assert!(copy.has_selection);
    assert!(!engine.view_model().has_selection);
}

#[test]
fn has_selection_comes_from_the_snapshot() {
    let mut engine = engine();
    let stale = SelectionSnapshot::from_identities([EntityIdentity::category(99)]);
    engine
        .update_with_selection(table(), VIEWPORT, &stale)
        .expect("update");

    let view_model = engine.view_model();
    assert!(view_model.has_selection);
    assert!(view_model.selected_identities().is_empty());
    assert!(engine.should_dim(&view_model.categories[0]));
}

#[test]
fn snapshot_capture_and_reconcile_count_matches() {
    let mut engine = engine();
    engine.apply_selection(&SelectionRequest::select(EntityIdentity::category(1)));
    engine.apply_selection(&SelectionRequest::toggle(EntityIdentity::data_point(
        0,
        Some("2019"),
        "Sales",
    )));

    let snapshot = SelectionSnapshot::capture(engine.view_model());
    assert!(snapshot.has_selection());
    assert_eq!(snapshot.selected().len(), 2);
    // 3 categories, 6 points, 2 distinct series.
    assert_eq!(snapshot.entity_count(), 11);

    let mut rebuilt = engine.view_model().clone();
    apply_selection_request(&mut rebuilt, &SelectionRequest::Clear);
    assert!(rebuilt.selected_identities().is_empty());
    // Category B, both of its points, and point A/2019.
    assert_eq!(snapshot.reconcile(&mut rebuilt), 4);
    assert!(rebuilt.categories[1].selected);
    assert!(rebuilt.categories[1].groups.iter().all(|group| group.selected));
    assert!(rebuilt.categories[0].groups[0].selected);
    assert!(!rebuilt.categories[0].groups[1].selected);
}
