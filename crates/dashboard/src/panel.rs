use formats::{Region, RegionId, VoteCount};
use tracing::debug;

use crate::config::{ChartConfig, LegendPosition, TileConfig};
use crate::tiles::{TileList, layout_tiles};

/// Prompt shown while nothing is selected.
pub const IDLE_PROMPT: &str = "Click an area on the map to inspect results and projects.";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    President,
    Vice,
}

/// A proportional (donut) chart request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub title: String,
    pub legend: LegendPosition,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
}

impl ChartSpec {
    pub fn from_votes(slot: ChartSlot, config: &ChartConfig, votes: &[VoteCount]) -> Self {
        Self {
            slot,
            title: config.title.clone(),
            legend: config.legend,
            labels: votes.iter().map(|v| v.name.clone()).collect(),
            values: votes.iter().map(|v| v.votes).collect(),
            colors: config.palette.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSummary {
    pub name: String,
    pub region_label: String,
    pub flood_projects: u64,
}

/// A live chart owned by the host's charting library.
pub trait ChartHandle {
    /// Releases the chart and its drawing surface resources.
    fn destroy(self);
}

/// The sidebar as seen from the binder.
pub trait PanelHost {
    type Chart: ChartHandle;

    fn render_chart(&mut self, spec: &ChartSpec) -> Self::Chart;

    /// `None` shows the idle prompt.
    fn show_summary(&mut self, summary: Option<&PanelSummary>);

    /// Replaces every tile in the strip.
    fn show_tiles(&mut self, tiles: &TileList);
}

/// What a bind produced, for tracing and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelBinding {
    pub region: RegionId,
    pub president: ChartSpec,
    pub vice: ChartSpec,
    pub tiles: TileList,
    pub summary: PanelSummary,
}

pub struct DetailPanel<H: PanelHost> {
    host: H,
    president_chart: ChartConfig,
    vice_chart: ChartConfig,
    tiles: TileConfig,
    president: Option<H::Chart>,
    vice: Option<H::Chart>,
}

impl<H: PanelHost> DetailPanel<H> {
    pub fn new(host: H, president_chart: ChartConfig, vice_chart: ChartConfig, tiles: TileConfig) -> Self {
        Self {
            host,
            president_chart,
            vice_chart,
            tiles,
            president: None,
            vice: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Shows the idle prompt. Used once, before the first selection.
    pub fn show_idle(&mut self) {
        self.host.show_summary(None);
    }

    /// Rebuilds everything for `region`. Previous charts are destroyed first.
    pub fn bind(&mut self, region: &Region) -> PanelBinding {
        self.destroy_charts();

        let attrs = &region.attributes;
        let president =
            ChartSpec::from_votes(ChartSlot::President, &self.president_chart, &attrs.president_votes);
        let vice = ChartSpec::from_votes(ChartSlot::Vice, &self.vice_chart, &attrs.vice_votes);
        let tiles = layout_tiles(&attrs.senatorial, &self.tiles);
        let summary = PanelSummary {
            name: region.name.clone(),
            region_label: attrs.region_label.clone(),
            flood_projects: attrs.flood_projects,
        };

        self.host.show_summary(Some(&summary));
        self.president = Some(self.host.render_chart(&president));
        self.vice = Some(self.host.render_chart(&vice));
        self.host.show_tiles(&tiles);

        debug!(
            region = %region.id,
            president = president.labels.len(),
            vice = vice.labels.len(),
            tiles = tiles.tiles.len(),
            "detail panel rebound"
        );

        PanelBinding {
            region: region.id.clone(),
            president,
            vice,
            tiles,
            summary,
        }
    }

    /// Destroys any live charts. Safe to call repeatedly.
    pub fn destroy_charts(&mut self) {
        if let Some(chart) = self.president.take() {
            chart.destroy();
        }
        if let Some(chart) = self.vice.take() {
            chart.destroy();
        }
    }
}

impl<H: PanelHost> Drop for DetailPanel<H> {
    fn drop(&mut self) {
        self.destroy_charts();
    }
}
