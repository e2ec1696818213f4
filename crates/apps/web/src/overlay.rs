use dashboard::{Composite, OverlaySurface, Stroke, SurfaceSize};
use foundation::{Rgba, ScreenPoint};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

pub const OVERLAY_CANVAS_ID: &str = "beam-overlay";

fn composite_op(mode: Composite) -> &'static str {
    match mode {
        Composite::SourceOver => "source-over",
        Composite::Lighter => "lighter",
    }
}

pub struct CanvasOverlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasOverlay {
    /// Creates the overlay canvas inside `container`, above the map and
    /// transparent to pointer events.
    pub fn attach(document: &Document, container: &HtmlElement) -> Result<Self, JsValue> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_id(OVERLAY_CANVAS_ID);
        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("inset", "0")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("z-index", "2")?;
        container.append_child(&canvas)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Removes the canvas from the page. Errors are ignored.
    pub fn detach(self) {
        self.canvas.remove();
    }
}

impl OverlaySurface for CanvasOverlay {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn set_composite(&mut self, mode: Composite) {
        let _ = self.ctx.set_global_composite_operation(composite_op(mode));
    }

    fn stroke_segment(&mut self, from: ScreenPoint, to: ScreenPoint, width_px: f64, stroke: &Stroke) {
        let ctx = &self.ctx;
        match stroke {
            Stroke::Solid(color) => ctx.set_stroke_style_str(&color.css()),
            Stroke::Gradient(stops) => {
                let gradient = ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                for stop in stops {
                    let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.css());
                }
                ctx.set_stroke_style_canvas_gradient(&gradient);
            }
        }
        ctx.set_line_width(width_px);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }

    fn fill_rect(&mut self, origin: ScreenPoint, width_px: f64, height_px: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(origin.x, origin.y, width_px, height_px);
    }
}

#[cfg(test)]
mod tests {
    use super::composite_op;
    use dashboard::Composite;

    #[test]
    fn composite_modes_map_to_canvas_names() {
        assert_eq!(composite_op(Composite::Lighter), "lighter");
        assert_eq!(composite_op(Composite::SourceOver), "source-over");
    }
}
