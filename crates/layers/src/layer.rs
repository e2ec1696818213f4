use serde_json::{Map, Value};

use crate::symbology::{FillStyle, LabelStyle, LineStyle};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Fill(FillStyle),
    Line(LineStyle),
    Symbol(LabelStyle),
}

impl LayerKind {
    fn type_name(&self) -> &'static str {
        match self {
            LayerKind::Fill(_) => "fill",
            LayerKind::Line(_) => "line",
            LayerKind::Symbol(_) => "symbol",
        }
    }
}

/// One styled layer over a geometry source, in the map's declarative form.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub id: LayerId,
    pub source: String,
    pub kind: LayerKind,
    /// Insert below this existing layer instead of on top.
    pub before: Option<LayerId>,
}

impl MapLayer {
    pub fn new(id: &str, source: &str, kind: LayerKind) -> Self {
        Self {
            id: LayerId(id.to_string()),
            source: source.to_string(),
            kind,
            before: None,
        }
    }

    pub fn before(mut self, layer: &str) -> Self {
        self.before = Some(LayerId(layer.to_string()));
        self
    }

    /// Layer spec object as accepted by the map's `addLayer`.
    pub fn to_style_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".to_string(), Value::String(self.id.0.clone()));
        obj.insert(
            "type".to_string(),
            Value::String(self.kind.type_name().to_string()),
        );
        obj.insert("source".to_string(), Value::String(self.source.clone()));
        match &self.kind {
            LayerKind::Fill(style) => {
                obj.insert("paint".to_string(), style.paint());
            }
            LayerKind::Line(style) => {
                obj.insert("paint".to_string(), style.paint());
            }
            LayerKind::Symbol(style) => {
                obj.insert("layout".to_string(), style.layout());
                obj.insert("paint".to_string(), style.paint());
            }
        }
        Value::Object(obj)
    }
}
