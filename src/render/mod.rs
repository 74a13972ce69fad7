mod frame;
mod null_renderer;
mod primitives;
mod text;

pub use frame::{LayerKind, RenderFrame, RenderGroup};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePaint, CirclePrimitive, Color, FontSpec, FontWeight, LinePrimitive, LineStrokeStyle,
    PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use text::{EstimatedTextMeasurer, TextMeasurer, estimate_text_width_px, measure_or_estimate};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from scales, gestures and formatting.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoTextMeasurer};
