use crate::error::ChartResult;
use crate::render::{LineKind, RenderFrame, Renderer};

/// Headless backend: validates every frame and records what it held.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_gridline_count: usize,
    pub last_connector_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    /// Whether the last frame asked for a cleared surface.
    pub cleared: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_gridline_count = frame.lines_of(LineKind::Gridline).count();
        self.last_connector_count = frame.lines_of(LineKind::Connector).count();
        self.last_circle_count = frame.circles.len();
        self.last_text_count = frame.texts.len();
        self.cleared = frame.is_empty();
        Ok(())
    }
}
