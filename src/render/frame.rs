use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LineKind, LinePrimitive, TextPrimitive};

/// Draw commands for one pass over the chart.
///
/// Backends paint `lines`, then `circles`, then `texts`, each in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &LinePrimitive> {
        self.lines.iter().filter(move |line| line.kind == kind)
    }

    /// A frame with nothing in it tells the backend to clear its surface.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.circles.is_empty() && self.texts.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.lines.iter().try_for_each(|line| line.validate())?;
        self.circles.iter().try_for_each(|circle| circle.validate())?;
        self.texts.iter().try_for_each(TextPrimitive::validate)
    }
}
