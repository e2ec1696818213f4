use dashboard::{CursorHint, FlyTo, MapView, Projector, SurfaceSize};
use foundation::{LonLat, ScreenPoint};
use js_sys::{Function, Reflect};
use layers::MapLayer;
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

#[wasm_bindgen(js_namespace = maplibregl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    pub type Map;

    #[wasm_bindgen(constructor, js_class = "Map", catch)]
    pub fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &Map, event: &str, layer: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = addSource, catch)]
    pub fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = addLayer, catch)]
    pub fn add_layer(this: &Map, layer: &JsValue, before: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getLayer)]
    pub fn get_layer(this: &Map, id: &str) -> JsValue;

    #[wasm_bindgen(method)]
    pub fn project(this: &Map, lng_lat: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &Map, options: &JsValue);

    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &Map) -> HtmlCanvasElement;

    #[wasm_bindgen(method, js_name = getContainer)]
    pub fn get_container(this: &Map) -> HtmlElement;

    #[wasm_bindgen(method, catch)]
    pub fn remove(this: &Map) -> Result<(), JsValue>;
}

/// Converts a JSON document into the equivalent JS object.
pub fn to_js(value: &Value) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(&value.to_string())
}

pub fn map_options(config: &dashboard::MapConfig, container: &str) -> Value {
    json!({
        "container": container,
        "style": config.style_url,
        "center": config.center,
        "zoom": config.zoom,
        "pitch": config.pitch,
        "bearing": config.bearing,
    })
}

pub fn fly_to_options(request: &FlyTo) -> Value {
    json!({
        "center": request.center.to_array(),
        "zoom": request.zoom,
        "speed": request.speed,
        "curve": request.curve,
        "essential": request.essential,
    })
}

/// The feature key a layer click refers to: its id, else its `name` property.
pub fn feature_key(event: &JsValue) -> Option<String> {
    let features = Reflect::get(event, &JsValue::from_str("features")).ok()?;
    let first = Reflect::get(&features, &JsValue::from_f64(0.0)).ok()?;
    if first.is_undefined() || first.is_null() {
        return None;
    }
    let id = Reflect::get(&first, &JsValue::from_str("id")).ok()?;
    if let Some(s) = id.as_string() {
        return Some(s);
    }
    if let Some(n) = id.as_f64() {
        return Some(format_numeric_id(n));
    }
    let props = Reflect::get(&first, &JsValue::from_str("properties")).ok()?;
    Reflect::get(&props, &JsValue::from_str("name"))
        .ok()?
        .as_string()
}

/// Integral ids print without a fractional part, matching the region set's keys.
pub fn format_numeric_id(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Inline GeoJSON source; the document is the one the dashboard was built
/// from, so the map never fetches it again.
pub fn geojson_source(document: Value) -> Value {
    json!({ "type": "geojson", "data": document })
}

/// Adds the region source, then its styled layers. Layers that reference a
/// missing `before` layer are appended on top instead.
pub fn install_region_layers(map: &Map, source_id: &str, source: &Value, layers: &[MapLayer]) -> Result<(), JsValue> {
    map.add_source(source_id, &to_js(source)?)?;
    for layer in layers {
        let before = match &layer.before {
            Some(id) if !map.get_layer(id.as_str()).is_undefined() => JsValue::from_str(id.as_str()),
            _ => JsValue::UNDEFINED,
        };
        map.add_layer(&to_js(&layer.to_style_value())?, &before)?;
    }
    Ok(())
}

/// The live map as the dashboard sees it.
pub struct MapHandle {
    map: Map,
}

impl MapHandle {
    pub fn new(map: Map) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn container(&self) -> HtmlElement {
        self.map.get_container()
    }
}

impl Projector for MapHandle {
    fn project(&self, coord: LonLat) -> ScreenPoint {
        let lng_lat = js_sys::Array::of2(&JsValue::from(coord.lon_deg), &JsValue::from(coord.lat_deg));
        let point = self.map.project(&lng_lat);
        let read = |key: &str| {
            Reflect::get(&point, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0)
        };
        ScreenPoint::new(read("x"), read("y"))
    }
}

impl MapView for MapHandle {
    fn viewport_size(&self) -> SurfaceSize {
        let container = self.container();
        SurfaceSize::new(
            container.client_width().max(0) as u32,
            container.client_height().max(0) as u32,
        )
    }

    fn fly_to(&mut self, request: &FlyTo) {
        match to_js(&fly_to_options(request)) {
            Ok(options) => self.map.fly_to(&options),
            Err(err) => tracing::warn!(?err, "flyTo options rejected"),
        }
    }

    fn set_cursor(&mut self, cursor: CursorHint) {
        let _ = self
            .map
            .get_canvas()
            .style()
            .set_property("cursor", cursor.css());
    }
}

#[cfg(test)]
mod tests {
    use super::{fly_to_options, format_numeric_id, geojson_source, map_options};
    use dashboard::{DashboardConfig, FlyTo};
    use foundation::LonLat;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fly_to_options_carry_every_field() {
        let request = FlyTo {
            center: LonLat::new(69.5, 40.9),
            zoom: 14.0,
            speed: 0.9,
            curve: 1.6,
            essential: true,
        };
        assert_eq!(
            fly_to_options(&request),
            json!({
                "center": [69.5, 40.9],
                "zoom": 14.0,
                "speed": 0.9,
                "curve": 1.6,
                "essential": true,
            })
        );
    }

    #[test]
    fn region_source_carries_the_fetched_document() {
        let document = json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "id": 7, "properties": { "name": "Osh" }, "geometry": null }],
        });
        let source = geojson_source(document.clone());
        assert_eq!(source["type"], "geojson");
        assert_eq!(source["data"], document);
        assert!(!source["data"].is_string());
    }

    #[test]
    fn map_options_use_configured_camera() {
        let config = DashboardConfig::default();
        let options = map_options(&config.map, "map");
        assert_eq!(options["container"], json!("map"));
        assert_eq!(options["zoom"], json!(13.0));
        assert_eq!(options["pitch"], json!(58.0));
        assert_eq!(options["bearing"], json!(-14.0));
    }

    #[test]
    fn numeric_ids_print_like_integers() {
        assert_eq!(format_numeric_id(7.0), "7");
        assert_eq!(format_numeric_id(-3.0), "-3");
        assert_eq!(format_numeric_id(1.5), "1.5");
    }
}
