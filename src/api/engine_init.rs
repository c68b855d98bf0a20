use crate::core::{
    ColorProvider, DefaultValueFormatter, HeuristicTextMetrics, PaletteColorProvider,
    TextMetricsProvider, ValueFormatter,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::validation::{validate_settings, validate_viewport};
use super::{ChartEngine, ChartEngineConfig, ViewModel};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine holding an empty model.
    ///
    /// Uses the heuristic text metrics, the default palette and the default
    /// value formatter until the host swaps them.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let viewport = validate_viewport(config.viewport)?;
        validate_settings(&config.settings)?;

        Ok(Self {
            renderer,
            settings: config.settings,
            viewport,
            metrics: Box::new(HeuristicTextMetrics),
            colors: Box::new(PaletteColorProvider::default()),
            formatter: Box::new(DefaultValueFormatter),
            data: None,
            view_model: ViewModel::empty(),
        })
    }

    #[must_use]
    pub fn with_text_metrics(mut self, metrics: impl TextMetricsProvider + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    #[must_use]
    pub fn with_color_provider(mut self, colors: impl ColorProvider + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    #[must_use]
    pub fn with_value_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }
}
