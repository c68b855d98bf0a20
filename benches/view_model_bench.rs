use criterion::{Criterion, criterion_group, criterion_main};
use dumbbell_rs::api::{
    ChartEngine, ChartEngineConfig, ChartSettings, SelectionSnapshot, aggregate, build_render_frame,
    compute_layout,
};
use dumbbell_rs::core::{
    CachedTextMetrics, CategoryColumn, ColumnMetadata, ColumnRoles, DataTable,
    DefaultValueFormatter, HeuristicTextMetrics, LinearScale, PaletteColorProvider, ValueColumn,
    ValueGroup, Viewport,
};
use dumbbell_rs::render::NullRenderer;
use std::hint::black_box;

fn generated_table(categories: usize, series: usize) -> DataTable {
    let category = CategoryColumn::new(
        "Category",
        (0..categories).map(|row| format!("Category {row}")),
    );
    let groups = (0..series)
        .map(|index| {
            let name = format!("Series {index}");
            let source = ColumnMetadata::new("Value", "Value")
                .with_roles(ColumnRoles::measure())
                .with_group_name(name.clone());
            let values = (0..categories)
                .map(|row| Some(((row * 37 + index * 101) % 1_000) as f64 * 1.25))
                .collect();
            ValueGroup::new(Some(name), vec![ValueColumn::new(source, values)])
        })
        .collect();
    DataTable::from_columns(category, groups)
}

fn bench_linear_scale_nice_ticks(c: &mut Criterion) {
    let scale = LinearScale::new(0.37, 9_876.5).expect("valid scale");

    c.bench_function("linear_scale_nice_ticks", |b| {
        b.iter(|| {
            let niced = black_box(scale).nice(3);
            let _ = niced.ticks(3);
        })
    });
}

fn bench_aggregate_1k_by_4(c: &mut Criterion) {
    let table = generated_table(1_000, 4);
    let settings = ChartSettings::default();
    let snapshot = SelectionSnapshot::default();

    c.bench_function("aggregate_1k_by_4", |b| {
        b.iter(|| {
            let mut colors = PaletteColorProvider::default();
            let _ = aggregate(
                black_box(&table),
                &settings,
                &snapshot,
                &mut colors,
                &DefaultValueFormatter,
            );
        })
    });
}

fn bench_layout_cached_metrics(c: &mut Criterion) {
    let table = generated_table(1_000, 4);
    let settings = ChartSettings::default();
    let view_model = aggregate(
        &table,
        &settings,
        &SelectionSnapshot::default(),
        &mut PaletteColorProvider::default(),
        &DefaultValueFormatter,
    );
    let metrics = CachedTextMetrics::new(HeuristicTextMetrics);

    c.bench_function("layout_1k_cached_metrics", |b| {
        b.iter(|| {
            let _ = compute_layout(
                black_box(&view_model),
                &settings,
                Viewport::new(1920, 1080),
                &metrics,
                &DefaultValueFormatter,
                None,
            )
            .expect("layout should succeed");
        })
    });
}

fn bench_full_update_and_frame(c: &mut Criterion) {
    let table = generated_table(200, 3);
    let viewport = Viewport::new(1280, 720);
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(viewport))
        .expect("engine init");

    c.bench_function("engine_update_and_frame_200_by_3", |b| {
        b.iter(|| {
            engine
                .update(black_box(table.clone()), viewport)
                .expect("update should succeed");
            let _ = build_render_frame(engine.view_model(), engine.settings(), viewport)
                .expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_nice_ticks,
    bench_aggregate_1k_by_4,
    bench_layout_cached_metrics,
    bench_full_update_and_frame
);
criterion_main!(benches);
