use foundation::{LonLat, vertex_mean};
use formats::{Region, RegionId};
use runtime::TimerQueue;
use tracing::debug;

use crate::animation::BeamState;
use crate::config::{DashboardConfig, FlyToConfig};
use crate::error::DashboardError;
use crate::projection::{Projector, SurfaceSize};
use crate::pulse::{PulseGeneration, PulseMarker};
use crate::selection::Selection;

/// Eased camera move, executed entirely by the map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyTo {
    pub center: LonLat,
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
    pub essential: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

impl CursorHint {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "",
            CursorHint::Pointer => "pointer",
        }
    }
}

/// The map as seen from the core: projection plus fire-and-forget commands.
pub trait MapView: Projector {
    fn viewport_size(&self) -> SurfaceSize;

    /// Starts a camera animation. Does not wait for it to finish.
    fn fly_to(&mut self, request: &FlyTo);

    fn set_cursor(&mut self, cursor: CursorHint);
}

/// Deferred work polled by the frame loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewTimer {
    HidePulse(PulseGeneration),
}

/// Mutable state shared by the click handler and the frame loop.
#[derive(Debug)]
pub struct ViewState {
    pub beam: BeamState,
    pub selection: Selection,
    pub pulse: PulseMarker,
    pub timers: TimerQueue<ViewTimer>,
}

impl ViewState {
    pub fn new(beam_origin: LonLat) -> Self {
        Self {
            beam: BeamState::idle(beam_origin),
            selection: Selection::new(),
            pulse: PulseMarker::new(),
            timers: TimerQueue::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub region: RegionId,
    pub centroid: LonLat,
    pub pulse: PulseGeneration,
    /// An unfinished beam was discarded.
    pub replaced_beam: bool,
    pub fly_to: FlyTo,
}

/// Vertex average of the outer ring.
///
/// Deliberately not an area-weighted centroid: the closing vertex of a ring
/// counts twice toward the mean, and the beam lands where this says.
pub fn centroid(region: &Region) -> Option<LonLat> {
    vertex_mean(region.outer_ring())
}

/// Holds configuration only; the view state it mutates is passed in by the
/// owner so the frame loop and the click handler share it.
#[derive(Debug, Clone)]
pub struct InteractionController {
    beam_origin: LonLat,
    fly_to: FlyToConfig,
    pulse_duration_ms: f64,
}

impl InteractionController {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            beam_origin: config.beam.origin(),
            fly_to: config.fly_to.clone(),
            pulse_duration_ms: config.pulse.duration_ms,
        }
    }

    pub fn beam_origin(&self) -> LonLat {
        self.beam_origin
    }

    /// Handles a click on `region` at host time `now_ms`.
    ///
    /// Last click wins: an in-flight beam is overwritten, and a pending hide
    /// from an earlier pulse becomes a no-op.
    pub fn on_region_clicked<M: MapView + ?Sized>(
        &self,
        region: &Region,
        now_ms: f64,
        state: &mut ViewState,
        map: &mut M,
    ) -> Result<ClickOutcome, DashboardError> {
        let center = centroid(region)
            .ok_or_else(|| DashboardError::EmptyGeometry(region.id.to_string()))?;

        state.selection.select(region.id.clone());
        let replaced_beam = state.beam.start(self.beam_origin, center);

        let pulse = state.pulse.show(center, map.project(center));
        state
            .timers
            .schedule(now_ms + self.pulse_duration_ms, ViewTimer::HidePulse(pulse));

        let fly_to = FlyTo {
            center,
            zoom: self.fly_to.zoom,
            speed: self.fly_to.speed,
            curve: self.fly_to.curve,
            essential: self.fly_to.essential,
        };
        map.fly_to(&fly_to);

        debug!(
            region = %region.id,
            lon = center.lon_deg,
            lat = center.lat_deg,
            replaced_beam,
            "region clicked"
        );

        Ok(ClickOutcome {
            region: region.id.clone(),
            centroid: center,
            pulse,
            replaced_beam,
            fly_to,
        })
    }

    pub fn on_hover<M: MapView + ?Sized>(&self, over_region: bool, map: &mut M) -> CursorHint {
        let cursor = if over_region {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        map.set_cursor(cursor);
        cursor
    }
}
