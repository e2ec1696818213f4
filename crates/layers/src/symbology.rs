use foundation::Rgba;
use serde_json::{Value, json};

/// Paint for a polygon fill layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FillStyle {
    pub color: Rgba,
    pub outline: Rgba,
}

/// Paint for a line layer. Several stacked line layers make the outline glow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width_px: f64,
    pub opacity: f64,
    pub blur_px: f64,
}

impl LineStyle {
    pub const fn new(color: Rgba, width_px: f64, opacity: f64) -> Self {
        Self {
            color,
            width_px,
            opacity,
            blur_px: 0.0,
        }
    }

    pub const fn with_blur(self, blur_px: f64) -> Self {
        Self { blur_px, ..self }
    }
}

/// Layout + paint for a text label layer keyed on a feature property.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub text_property: String,
    pub size_px: f64,
    pub color: Rgba,
    pub halo_color: Rgba,
    pub halo_width_px: f64,
}

/// Colours go out as hex when opaque so they match hand-written style JSON.
fn color_value(c: Rgba) -> Value {
    if c.a >= 1.0 {
        Value::String(c.to_hex())
    } else {
        Value::String(c.css())
    }
}

impl FillStyle {
    pub fn paint(&self) -> Value {
        json!({
            "fill-color": color_value(self.color),
            "fill-outline-color": color_value(self.outline),
        })
    }
}

impl LineStyle {
    pub fn paint(&self) -> Value {
        let mut paint = json!({
            "line-color": color_value(self.color),
            "line-width": self.width_px,
            "line-opacity": self.opacity,
        });
        if self.blur_px > 0.0 {
            paint["line-blur"] = json!(self.blur_px);
        }
        paint
    }
}

impl LabelStyle {
    pub fn layout(&self) -> Value {
        json!({
            "text-field": ["get", self.text_property],
            "text-size": self.size_px,
        })
    }

    pub fn paint(&self) -> Value {
        json!({
            "text-color": color_value(self.color),
            "text-halo-color": color_value(self.halo_color),
            "text-halo-width": self.halo_width_px,
        })
    }
}
