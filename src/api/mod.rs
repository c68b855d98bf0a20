mod aggregator;
mod data_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod interaction_controller;
mod json_contract;
mod layout;
mod projection;
mod render_frame_builder;
mod selection;
mod settings;
mod validation;
mod view_model;

pub use aggregator::{BLANK_VALUE_LABEL, HIGHLIGHTED_TOOLTIP_LABEL, aggregate};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use json_contract::{VIEW_MODEL_JSON_SCHEMA_V1, ViewModelJsonContractV1};
pub use layout::{
    BASE_MARGIN_PX, LabelMeasurements, VALUE_AXIS_TICK_COUNT, compute_layout, derive_margin,
    measure_labels,
};
pub use projection::{DumbbellConnector, DumbbellGeometry, DumbbellPoint, project_dumbbells};
pub use render_frame_builder::{
    DIMMED_OPACITY, GRIDLINE_OPACITY, GRIDLINE_WIDTH_PX, build_render_frame,
};
pub use selection::SelectionSnapshot;
pub use settings::{
    CategoryAxisOrientation, CategoryAxisSettings, ChartSettings, ConnectingLineSettings,
    DEFAULT_FONT_FAMILY, DataLabelSettings, DataPointSettings, ValueAxisSettings,
};
pub use validation::{ValidationOutcome, validate_data_table, validate_settings};
pub use view_model::{
    AxisSide, AxisTick, AxisTranslate, Category, CategoryAxis, ChartLayout, Group, Selectable,
    TooltipEntry, TooltipPayload, ValueAxis, ViewModel, ViewModelState,
};
