use foundation::{Rgba, ScreenPoint};

use crate::projection::SurfaceSize;

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Additive: overlapping strokes brighten instead of covering.
    Lighter,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stroke {
    Solid(Rgba),
    /// Linear gradient laid along the stroked segment, from its start to its end.
    Gradient(Vec<GradientStop>),
}

/// A transparent drawing surface stacked above the map.
///
/// Implementations own the pixel buffer; its size must follow the map
/// viewport.
pub trait OverlaySurface {
    fn size(&self) -> SurfaceSize;

    /// Reallocates the backing store. Contents are lost.
    fn resize(&mut self, size: SurfaceSize);

    /// Clears every pixel.
    fn clear(&mut self);

    fn set_composite(&mut self, mode: Composite);

    /// Strokes the straight segment `from -> to` with round caps.
    fn stroke_segment(&mut self, from: ScreenPoint, to: ScreenPoint, width_px: f64, stroke: &Stroke);

    fn fill_rect(&mut self, origin: ScreenPoint, width_px: f64, height_px: f64, color: Rgba);
}
