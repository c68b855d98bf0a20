pub mod band_scale;
pub mod color;
pub mod data_table;
pub mod format;
pub mod identity;
pub mod scale;
pub mod text_metrics;
pub mod types;

pub use band_scale::BandScale;
pub use color::{Color, ColorProvider, DEFAULT_PALETTE, PaletteColorProvider};
pub use data_table::{
    CategoryColumn, ColumnMetadata, ColumnRoles, DataTable, SeriesOverrides, ValueColumn,
    ValueGroup,
};
pub use format::{
    DefaultValueFormatter, DisplayUnits, FormatLocale, FormatOptions, ValueFormatter,
    precision_from_step,
};
pub use identity::EntityIdentity;
pub use scale::LinearScale;
pub use text_metrics::{
    CachedTextMetrics, FontSpec, HeuristicTextMetrics, TextMetricsCacheStats,
    TextMetricsProvider,
};
pub use types::{Margin, TextSize, Viewport};
