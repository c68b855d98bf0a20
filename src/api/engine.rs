use tracing::debug;

use crate::core::{ColorProvider, DataTable, TextMetricsProvider, ValueFormatter, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::render_frame_builder::build_render_frame;
use super::{ChartSettings, ViewModel};

/// Facade owning the single current `ViewModel`.
///
/// Every data update rebuilds the model wholesale (aggregate, reconcile,
/// layout); a resize only reruns layout. Invalid input still replaces the
/// model, so a stale one is never left behind.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) settings: ChartSettings,
    pub(super) viewport: Viewport,
    pub(super) metrics: Box<dyn TextMetricsProvider>,
    pub(super) colors: Box<dyn ColorProvider>,
    pub(super) formatter: Box<dyn ValueFormatter>,
    pub(super) data: Option<DataTable>,
    pub(super) view_model: ViewModel,
}

impl<R: Renderer> ChartEngine<R> {
    /// Builds the render frame for the current model and hands it to the
    /// renderer. Empty and invalid models produce an empty frame.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = build_render_frame(&self.view_model, &self.settings, self.viewport)?;
        debug!(
            state = ?self.view_model.state(),
            lines = frame.lines.len(),
            circles = frame.circles.len(),
            texts = frame.texts.len(),
            "render frame"
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
