//! dumbbell-rs: view-model and layout engine for dumbbell comparison charts.
//!
//! A host hands the engine a categorical `DataTable`, `ChartSettings` and a
//! viewport. The engine aggregates per-category extrema, assigns stable
//! identities and colors, carries selection across rebuilds and runs a
//! two-pass, text-measurement-driven layout. The resulting `ViewModel` is
//! turned into a backend-agnostic `RenderFrame` for any `Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartSettings, ViewModel};
pub use error::{ChartError, ChartResult};
