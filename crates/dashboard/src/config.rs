// ── Dashboard Configuration ────────────────────────────────────────────────
//
// Every tunable of the view lives here with its default. The page may pass a
// partial JSON document; missing fields keep their defaults.

use foundation::{LonLat, Rgba};
use serde::{Deserialize, Deserializer};

use crate::error::DashboardError;

/// Reference point the beam always starts from, and the initial map center.
pub const DEFAULT_ORIGIN: [f64; 2] = [69.52, 40.898];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub map: MapConfig,
    pub beam: BeamConfig,
    pub fly_to: FlyToConfig,
    pub pulse: PulseConfig,
    pub tiles: TileConfig,
    #[serde(deserialize_with = "president_chart_override")]
    pub president_chart: ChartConfig,
    #[serde(deserialize_with = "vice_chart_override")]
    pub vice_chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            beam: BeamConfig::default(),
            fly_to: FlyToConfig::default(),
            pulse: PulseConfig::default(),
            tiles: TileConfig::default(),
            president_chart: ChartConfig::president(),
            vice_chart: ChartConfig::vice(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Basemap style document.
    pub style_url: String,
    /// Region GeoJSON, fetched once at load.
    pub source_url: String,
    /// Id the region source is registered under on the map.
    pub source_id: String,
    /// Initial camera center, `[lon, lat]`.
    pub center: [f64; 2],
    pub zoom: f64,
    /// Degrees.
    pub pitch: f64,
    /// Degrees.
    pub bearing: f64,
    /// Layer whose features respond to click/hover.
    pub interactive_layer: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style_url: "/neon-style.json".to_string(),
            source_url: "/geojson/uz_chinaz.geojson".to_string(),
            source_id: "chinaz".to_string(),
            center: DEFAULT_ORIGIN,
            zoom: 13.0,
            pitch: 58.0,
            bearing: -14.0,
            interactive_layer: layers::INTERACTIVE_LAYER_ID.to_string(),
        }
    }
}

impl MapConfig {
    pub fn center(&self) -> LonLat {
        LonLat::from(self.center)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Fixed source coordinate of every beam, `[lon, lat]`.
    pub origin: [f64; 2],
    /// Progress added per frame tick. Frame-rate dependent on purpose.
    pub step: f64,
    /// Gradient stroke width at progress 0.
    pub width_start_px: f64,
    /// Gradient stroke width at progress 1.
    pub width_end_px: f64,
    /// Width of the bright core stroke.
    pub core_width_px: f64,
    pub sparkle_count: usize,
    /// Sparkles land in `[0, max_fraction)` of the drawn segment.
    pub sparkle_max_fraction: f64,
    /// Total jitter span per axis; offsets fall in `[-jitter/2, jitter/2)`.
    pub sparkle_jitter_px: f64,
    pub sparkle_min_size_px: f64,
    pub sparkle_max_size_px: f64,
    pub sparkle_max_alpha: f32,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            step: 0.02,
            width_start_px: 8.0,
            width_end_px: 26.0,
            core_width_px: 2.0,
            sparkle_count: 6,
            sparkle_max_fraction: 0.9,
            sparkle_jitter_px: 6.0,
            sparkle_min_size_px: 1.0,
            sparkle_max_size_px: 3.0,
            sparkle_max_alpha: 0.6,
        }
    }
}

impl BeamConfig {
    pub fn origin(&self) -> LonLat {
        LonLat::from(self.origin)
    }
}

/// Camera move requested on every region click. Executed by the map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlyToConfig {
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
    /// Animate even when the user prefers reduced motion.
    pub essential: bool,
}

impl Default for FlyToConfig {
    fn default() -> Self {
        Self {
            zoom: 14.0,
            speed: 0.9,
            curve: 1.6,
            essential: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// How long the marker stays visible after a click.
    pub duration_ms: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Width a tile holding 100% of the votes would get.
    pub full_width_px: f64,
    /// Floor so zero-vote tiles stay visible and clickable.
    pub min_width_px: f64,
    /// Share strictly above this is the leading tier.
    pub leading_share: f64,
    /// Share strictly above this (and not leading) is the competitive tier.
    pub competitive_share: f64,
    /// Colours for leading, competitive, trailing.
    pub palette: [String; 3],
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            full_width_px: 240.0,
            min_width_px: 40.0,
            leading_share: 0.35,
            competitive_share: 0.18,
            palette: [
                "#ff6a6a".to_string(),
                "#ffb86a".to_string(),
                "#6ad7ff".to_string(),
            ],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Left,
    #[default]
    Bottom,
    Right,
}

impl LegendPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            LegendPosition::Top => "top",
            LegendPosition::Left => "left",
            LegendPosition::Bottom => "bottom",
            LegendPosition::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub legend: LegendPosition,
    /// Slice colours, cycled by the chart when there are more categories.
    pub palette: Vec<String>,
}

/// Partial chart settings; absent fields fall back to the slot's own defaults.
#[derive(Debug, Deserialize)]
struct ChartOverride {
    title: Option<String>,
    legend: Option<LegendPosition>,
    palette: Option<Vec<String>>,
}

impl ChartOverride {
    fn apply(self, base: ChartConfig) -> ChartConfig {
        ChartConfig {
            title: self.title.unwrap_or(base.title),
            legend: self.legend.unwrap_or(base.legend),
            palette: self.palette.unwrap_or(base.palette),
        }
    }
}

fn president_chart_override<'de, D: Deserializer<'de>>(d: D) -> Result<ChartConfig, D::Error> {
    ChartOverride::deserialize(d).map(|o| o.apply(ChartConfig::president()))
}

fn vice_chart_override<'de, D: Deserializer<'de>>(d: D) -> Result<ChartConfig, D::Error> {
    ChartOverride::deserialize(d).map(|o| o.apply(ChartConfig::vice()))
}

impl ChartConfig {
    pub fn president() -> Self {
        Self {
            title: "Presidential Votes".to_string(),
            legend: LegendPosition::Bottom,
            palette: vec![
                "#ff6a6a".to_string(),
                "#6ad7ff".to_string(),
                "#ffcc66".to_string(),
            ],
        }
    }

    pub fn vice() -> Self {
        Self {
            title: "Vice Presidential Votes".to_string(),
            legend: LegendPosition::Bottom,
            palette: vec!["#ffb34d".to_string(), "#ff4da6".to_string()],
        }
    }
}

impl DashboardConfig {
    /// Parses a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(payload: &str) -> Result<Self, DashboardError> {
        let config: Self =
            serde_json::from_str(payload).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        let beam = &self.beam;
        if !(beam.step > 0.0 && beam.step <= 1.0) {
            return Err(DashboardError::Config(format!(
                "beam.step must be in (0, 1], got {}",
                beam.step
            )));
        }
        if !(0.0..=1.0).contains(&beam.sparkle_max_fraction) {
            return Err(DashboardError::Config(
                "beam.sparkle_max_fraction must be in [0, 1]".to_string(),
            ));
        }
        if beam.sparkle_min_size_px > beam.sparkle_max_size_px || beam.sparkle_min_size_px < 0.0 {
            return Err(DashboardError::Config(
                "beam sparkle size range is invalid".to_string(),
            ));
        }
        if !LonLat::from(beam.origin).is_finite() || !self.map.center().is_finite() {
            return Err(DashboardError::Config(
                "coordinates must be finite".to_string(),
            ));
        }
        if self.pulse.duration_ms < 0.0 {
            return Err(DashboardError::Config(
                "pulse.duration_ms must not be negative".to_string(),
            ));
        }
        let tiles = &self.tiles;
        if tiles.min_width_px < 0.0 || tiles.full_width_px < tiles.min_width_px {
            return Err(DashboardError::Config(
                "tiles need 0 <= min_width_px <= full_width_px".to_string(),
            ));
        }
        if tiles.competitive_share > tiles.leading_share {
            return Err(DashboardError::Config(
                "tiles.competitive_share must not exceed tiles.leading_share".to_string(),
            ));
        }
        let colors = tiles
            .palette
            .iter()
            .chain(&self.president_chart.palette)
            .chain(&self.vice_chart.palette);
        for color in colors {
            if Rgba::from_hex(color).is_none() {
                return Err(DashboardError::Config(format!(
                    "palette colours must be #rrggbb, got {color:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardConfig, LegendPosition};
    use crate::error::DashboardError;

    #[test]
    fn defaults_match_documented_values() {
        let c = DashboardConfig::default();
        assert_eq!(c.beam.step, 0.02);
        assert_eq!(c.beam.sparkle_count, 6);
        assert_eq!(c.pulse.duration_ms, 1800.0);
        assert_eq!(c.fly_to.zoom, 14.0);
        assert_eq!(c.map.interactive_layer, "outline-core");
        assert_eq!(c.president_chart.title, "Presidential Votes");
        assert_eq!(c.vice_chart.title, "Vice Presidential Votes");
        assert_eq!(c.vice_chart.legend, LegendPosition::Bottom);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let c = DashboardConfig::from_json(
            r#"{"pulse": {"duration_ms": 900}, "map": {"zoom": 11.5}, "vice_chart": {"title": "VP"}}"#,
        )
        .expect("config");
        assert_eq!(c.pulse.duration_ms, 900.0);
        assert_eq!(c.map.zoom, 11.5);
        assert_eq!(c.map.pitch, 58.0);
        assert_eq!(c.vice_chart.title, "VP");
        assert_eq!(c.president_chart.title, "Presidential Votes");
        assert_eq!(DashboardConfig::from_json("{}"), Ok(DashboardConfig::default()));
    }

    #[test]
    fn partial_chart_override_keeps_its_own_slot_defaults() {
        let c = DashboardConfig::from_json(r#"{"vice_chart": {"legend": "top"}}"#).expect("config");
        assert_eq!(c.vice_chart.legend, LegendPosition::Top);
        assert_eq!(c.vice_chart.title, "Vice Presidential Votes");
        assert_eq!(c.vice_chart.palette, vec!["#ffb34d", "#ff4da6"]);
        assert_eq!(c.president_chart, super::ChartConfig::president());

        let c = DashboardConfig::from_json(r##"{"president_chart": {"palette": ["#000000"]}}"##)
            .expect("config");
        assert_eq!(c.president_chart.title, "Presidential Votes");
        assert_eq!(c.president_chart.palette, vec!["#000000"]);
        assert_eq!(c.vice_chart, super::ChartConfig::vice());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{"beam": {"step": 0}}"#),
            Err(DashboardError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{"tiles": {"min_width_px": 500}}"#),
            Err(DashboardError::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json("[1,2]"),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn rejects_palette_entries_that_are_not_hex() {
        assert_eq!(
            DashboardConfig::from_json(r##"{"vice_chart": {"palette": ["#ffb34d", "orange"]}}"##),
            Err(DashboardError::Config(
                "palette colours must be #rrggbb, got \"orange\"".to_string()
            ))
        );
        assert!(matches!(
            DashboardConfig::from_json(r##"{"tiles": {"palette": ["#fff", "#00ff00", "#0000ff"]}}"##),
            Err(DashboardError::Config(_))
        ));
        assert!(DashboardConfig::from_json(r#"{"president_chart": {"palette": ["6ad7ff"]}}"#).is_ok());
    }
}
