//! Backend-agnostic draw commands.
//!
//! Painting lives outside this crate: a backend implements `Renderer` and
//! walks the primitives of each `RenderFrame` it receives.

mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, LineKind, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

pub use crate::core::Color;

use crate::error::ChartResult;

pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
