use dashboard::{ChartHandle, ChartSlot, ChartSpec, IDLE_PROMPT, PanelHost, PanelSummary, Tile, TileList, TileTier, VisiblePulse};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::chartjs::{Chart, doughnut_config};
use crate::maplibre::to_js;

pub const SUMMARY_ID: &str = "panel-summary";
pub const DETAILS_ID: &str = "panel-details";
pub const PRESIDENT_CANVAS_ID: &str = "donut";
pub const VICE_CANVAS_ID: &str = "donut2";
pub const TILES_ID: &str = "treemap";
pub const PULSE_ID: &str = "pulse-dot";

/// A live Chart.js instance, or nothing when the canvas or library was missing.
pub struct ChartJsHandle(Option<Chart>);

impl ChartHandle for ChartJsHandle {
    fn destroy(self) {
        if let Some(chart) = self.0 {
            chart.destroy();
        }
    }
}

pub struct ChartJsHost {
    document: Document,
}

impl ChartJsHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn append_line(&self, parent: &HtmlElement, text: &str, strong: bool) -> Result<(), JsValue> {
        let line = self.document.create_element("div")?;
        line.set_class_name("stat");
        if strong {
            let b = self.document.create_element("strong")?;
            b.set_text_content(Some(text));
            line.append_child(&b)?;
        } else {
            line.set_text_content(Some(text));
        }
        parent.append_child(&line)?;
        Ok(())
    }

    fn render_summary(&self, summary: Option<&PanelSummary>) -> Result<(), JsValue> {
        let Some(el) = self.element(SUMMARY_ID) else {
            return Ok(());
        };
        el.set_text_content(None);
        match summary {
            None => self.append_line(&el, IDLE_PROMPT, false)?,
            Some(s) => {
                self.append_line(&el, &s.name, true)?;
                self.append_line(&el, &format!("Region: {}", s.region_label), false)?;
                self.append_line(&el, &format!("Flood control projects: {}", s.flood_projects), false)?;
            }
        }
        if let Some(details) = self.element(DETAILS_ID) {
            let display = if summary.is_some() { "block" } else { "none" };
            details.style().set_property("display", display)?;
        }
        Ok(())
    }

    fn render_tiles(&self, tiles: &TileList) -> Result<(), JsValue> {
        let Some(container) = self.element(TILES_ID) else {
            return Ok(());
        };
        container.set_text_content(None);
        for tile in &tiles.tiles {
            let el = self
                .document
                .create_element("div")?
                .dyn_into::<HtmlElement>()?;
            el.set_class_name(&tile_class(tile));
            el.set_title(&format!("{}: {} ({}%)", tile.name, tile.votes, tile.percent));
            el.set_text_content(Some(&tile.label));
            let style = el.style();
            style.set_property("flex", &tile_flex(tile))?;
            style.set_property("background", &tile.color)?;
            container.append_child(&el)?;
        }
        Ok(())
    }

    fn try_render_chart(&self, spec: &ChartSpec) -> Result<Chart, JsValue> {
        let id = match spec.slot {
            ChartSlot::President => PRESIDENT_CANVAS_ID,
            ChartSlot::Vice => VICE_CANVAS_ID,
        };
        let canvas = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str("missing chart canvas"))?
            .dyn_into::<HtmlCanvasElement>()?;
        if spec.is_empty() {
            debug!(slot = ?spec.slot, "chart has no categories");
        }
        Chart::new(&canvas, &to_js(&doughnut_config(spec))?)
    }

    /// Places the pulse dot at its click-time screen position, or hides it.
    pub fn show_pulse(&self, pulse: Option<&VisiblePulse>) {
        let Some(el) = self.element(PULSE_ID) else {
            return;
        };
        let style = el.style();
        let _ = match pulse {
            Some(p) => style
                .set_property("left", &format!("{}px", p.screen.x))
                .and_then(|_| style.set_property("top", &format!("{}px", p.screen.y)))
                .and_then(|_| style.set_property("display", "block")),
            None => style.set_property("display", "none"),
        };
    }
}

impl PanelHost for ChartJsHost {
    type Chart = ChartJsHandle;

    fn render_chart(&mut self, spec: &ChartSpec) -> ChartJsHandle {
        match self.try_render_chart(spec) {
            Ok(chart) => ChartJsHandle(Some(chart)),
            Err(err) => {
                warn!(slot = ?spec.slot, ?err, "chart not rendered");
                ChartJsHandle(None)
            }
        }
    }

    fn show_summary(&mut self, summary: Option<&PanelSummary>) {
        if let Err(err) = self.render_summary(summary) {
            warn!(?err, "summary not rendered");
        }
    }

    fn show_tiles(&mut self, tiles: &TileList) {
        if let Err(err) = self.render_tiles(tiles) {
            warn!(?err, "tiles not rendered");
        }
    }
}

pub fn tile_class(tile: &Tile) -> String {
    let tier = match tile.tier {
        TileTier::Leading => "leading",
        TileTier::Competitive => "competitive",
        TileTier::Trailing => "trailing",
    };
    format!("tile tile-{tier}")
}

/// Flex shorthand: grow and shrink evenly from the computed basis.
pub fn tile_flex(tile: &Tile) -> String {
    format!("1 1 {}px", tile.width_px.round())
}
