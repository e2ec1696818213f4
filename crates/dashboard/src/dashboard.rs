use formats::{RegionSet, RegionSourceError, regions_from_geojson_str};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use runtime::{EventBus, Frame, FrameLoop, Stamped};
use tracing::{debug, info, warn};

use crate::beam::{BeamRenderer, BeamTick};
use crate::config::DashboardConfig;
use crate::controller::{ClickOutcome, CursorHint, InteractionController, MapView, ViewState, ViewTimer};
use crate::error::DashboardError;
use crate::events::DashboardEvent;
use crate::panel::{DetailPanel, PanelHost};
use crate::projection::SurfaceSize;
use crate::pulse::PulseHide;
use crate::surface::OverlaySurface;

/// What one frame did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: Frame,
    /// `None` when the overlay was unavailable and the frame was skipped.
    pub beam: Option<BeamTick>,
}

/// One mounted dashboard view.
///
/// Every entry point runs on the host's single UI thread: clicks, hovers,
/// resizes, frame ticks and teardown arrive as discrete, ordered calls.
pub struct Dashboard<H: PanelHost> {
    regions: RegionSet,
    state: ViewState,
    controller: InteractionController,
    renderer: BeamRenderer,
    panel: DetailPanel<H>,
    frame_loop: FrameLoop,
    events: EventBus<DashboardEvent>,
    rng: SmallRng,
}

impl<H: PanelHost> Dashboard<H> {
    /// `seed` drives the sparkle placement only.
    pub fn new(config: DashboardConfig, regions: RegionSet, host: H, seed: u64) -> Self {
        if regions.is_empty() {
            warn!("dashboard mounted without regions");
        } else {
            info!(regions = regions.len(), "dashboard mounted");
        }
        let controller = InteractionController::new(&config);
        let mut panel = DetailPanel::new(host, config.president_chart, config.vice_chart, config.tiles);
        panel.show_idle();
        Self {
            state: ViewState::new(controller.beam_origin()),
            renderer: BeamRenderer::new(config.beam),
            controller,
            panel,
            regions,
            frame_loop: FrameLoop::new(),
            events: EventBus::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_geojson(
        config: DashboardConfig,
        geojson: &str,
        host: H,
        seed: u64,
    ) -> Result<Self, DashboardError> {
        config.validate()?;
        let regions = regions_from_geojson_str(geojson).map_err(|e: RegionSourceError| {
            warn!(error = %e, "region source rejected");
            DashboardError::from(e)
        })?;
        Ok(Self::new(config, regions, host, seed))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn panel(&self) -> &DetailPanel<H> {
        &self.panel
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn events(&self) -> &[Stamped<DashboardEvent>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<DashboardEvent>> {
        self.events.drain()
    }

    fn frame_index(&self) -> u64 {
        self.frame_loop.last_frame().map_or(0, |f| f.index)
    }

    fn emit(&mut self, event: DashboardEvent) {
        let index = self.frame_index();
        self.events.emit(index, event);
    }

    /// Click on a rendered feature. `key` is the feature id or name.
    ///
    /// Unknown keys change nothing.
    pub fn region_clicked<M: MapView + ?Sized>(
        &mut self,
        key: &str,
        now_ms: f64,
        map: &mut M,
    ) -> Result<ClickOutcome, DashboardError> {
        let Some(region) = self.regions.get(key) else {
            warn!(key, "click on unknown region ignored");
            return Err(DashboardError::UnknownRegion(key.to_string()));
        };

        let outcome = match self
            .controller
            .on_region_clicked(region, now_ms, &mut self.state, map)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(key, error = %err, "click on region ignored");
                return Err(err);
            }
        };
        let binding = self.panel.bind(region);

        self.emit(DashboardEvent::SelectionChanged {
            region: outcome.region.clone(),
        });
        self.emit(DashboardEvent::BeamStarted {
            destination: outcome.centroid,
            replaced: outcome.replaced_beam,
        });
        self.emit(DashboardEvent::PulseShown {
            generation: outcome.pulse,
        });
        self.emit(DashboardEvent::FlyToRequested {
            center: outcome.fly_to.center,
            zoom: outcome.fly_to.zoom,
        });
        self.emit(DashboardEvent::PanelRebound {
            region: binding.region,
            president: binding.president.labels.len(),
            vice: binding.vice.labels.len(),
            tiles: binding.tiles.tiles.len(),
        });
        Ok(outcome)
    }

    pub fn hover<M: MapView + ?Sized>(&mut self, over_region: bool, map: &mut M) -> CursorHint {
        self.controller.on_hover(over_region, map)
    }

    /// Viewport resize. The overlay follows the map's current size.
    pub fn resize<S: OverlaySurface + ?Sized>(&mut self, viewport: SurfaceSize, surface: &mut S) {
        if surface.size() != viewport {
            surface.resize(viewport);
            debug!(width = viewport.width, height = viewport.height, "overlay resized");
            self.emit(DashboardEvent::OverlayResized { size: viewport });
        }
    }

    /// One animation frame at host time `time_ms`.
    ///
    /// Returns `None` once torn down; the host must stop rescheduling.
    pub fn frame<M, S>(
        &mut self,
        time_ms: f64,
        map: &M,
        surface: Option<&mut S>,
    ) -> Option<FrameReport>
    where
        M: MapView + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        let frame = self.frame_loop.tick(time_ms)?;
        self.run_timers(time_ms);

        let Some(surface) = surface else {
            debug!(frame = frame.index, "overlay unavailable, frame skipped");
            self.emit(DashboardEvent::FrameSkipped);
            return Some(FrameReport { frame, beam: None });
        };

        self.resize(map.viewport_size(), &mut *surface);
        let tick = self
            .renderer
            .tick(&mut self.state.beam, map, &mut *surface, &mut self.rng);
        if let BeamTick::Arrived(_) = tick {
            self.emit(DashboardEvent::BeamArrived {
                destination: self.state.beam.destination(),
            });
        }
        Some(FrameReport {
            frame,
            beam: Some(tick),
        })
    }

    fn run_timers(&mut self, now_ms: f64) {
        if self.state.timers.is_empty() {
            return;
        }
        for timer in self.state.timers.drain_due(now_ms) {
            match timer {
                ViewTimer::HidePulse(generation) => match self.state.pulse.hide(generation) {
                    PulseHide::Hidden => {
                        debug!(generation = generation.0, "pulse hidden");
                        self.emit(DashboardEvent::PulseHidden { generation });
                    }
                    PulseHide::Stale | PulseHide::AlreadyHidden => {
                        debug!(generation = generation.0, "stale pulse hide ignored");
                        self.emit(DashboardEvent::PulseHideIgnored { generation });
                    }
                },
            }
        }
    }

    /// Stops the frame loop, drops pending timers and destroys charts.
    ///
    /// Idempotent. Removal of host resources is the host's job and may fail
    /// silently.
    pub fn teardown(&mut self) {
        if !self.is_running() {
            return;
        }
        self.frame_loop.token().cancel();
        self.state.timers.clear();
        self.panel.destroy_charts();
        self.emit(DashboardEvent::TornDown);
        info!("dashboard torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::Dashboard;
    use crate::beam::BeamTick;
    use crate::beam::tests::{Op, RecordingSurface};
    use crate::config::DashboardConfig;
    use crate::controller::tests::FakeMap;
    use crate::error::DashboardError;
    use crate::events::DashboardEvent;
    use crate::panel::tests::{FakeHost, region_with};
    use formats::{RegionAttributes, RegionSet};
    use crate::projection::SurfaceSize;
    use crate::surface::OverlaySurface;
    use pretty_assertions::assert_eq;

    const GEOJSON: &str = include_str!("../../formats/assets/uz_chinaz.geojson");

    fn mount() -> (Dashboard<FakeHost>, FakeHost) {
        let host = FakeHost::default();
        let dash = Dashboard::from_geojson(DashboardConfig::default(), GEOJSON, host.clone(), 7)
            .expect("mount");
        (dash, host)
    }

    fn no_surface() -> Option<&'static mut RecordingSurface> {
        None
    }

    #[test]
    fn mount_shows_idle_prompt() {
        let (dash, host) = mount();
        assert_eq!(host.log.borrow().summaries, vec![None]);
        assert!(dash.state().selection.current().is_none());
    }

    #[test]
    fn click_runs_the_whole_pipeline() {
        let (mut dash, host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));
        let mut surface = RecordingSurface::default();

        dash.frame(0.0, &map, Some(&mut surface));
        dash.region_clicked("chinaz-center", 10.0, &mut map)
            .expect("click");

        assert_eq!(host.log.borrow().rendered.len(), 2);
        assert_eq!(map.flights.len(), 1);

        let kinds: Vec<&str> = dash
            .events()
            .iter()
            .map(|e| match e.event {
                DashboardEvent::OverlayResized { .. } => "resized",
                DashboardEvent::SelectionChanged { .. } => "selected",
                DashboardEvent::BeamStarted { .. } => "beam",
                DashboardEvent::PulseShown { .. } => "pulse",
                DashboardEvent::FlyToRequested { .. } => "fly",
                DashboardEvent::PanelRebound { .. } => "panel",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["resized", "selected", "beam", "pulse", "fly", "panel"]);

        let mut arrived_at = None;
        for i in 1..=60 {
            let report = dash
                .frame(10.0 + i as f64 * 16.0, &map, Some(&mut surface))
                .expect("running");
            if let Some(BeamTick::Arrived(_)) = report.beam {
                arrived_at = Some(i);
            }
        }
        assert_eq!(arrived_at, Some(50));
        assert!(!dash.state().beam.is_active());
    }

    #[test]
    fn overlay_tracks_viewport_before_painting() {
        let (mut dash, _host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));
        let mut surface = RecordingSurface::default();
        dash.region_clicked("chinaz-north", 0.0, &mut map).expect("click");

        dash.frame(16.0, &map, Some(&mut surface));
        assert_eq!(surface.size(), SurfaceSize::new(800, 600));

        map = FakeMap::new(SurfaceSize::new(1024, 768));
        surface.ops.clear();
        dash.frame(32.0, &map, Some(&mut surface));
        assert_eq!(surface.size(), SurfaceSize::new(1024, 768));
        assert_eq!(surface.ops[0], Op::Resize(SurfaceSize::new(1024, 768)));
        assert_eq!(surface.ops[1], Op::Clear);

        // Explicit resize events go through the same path.
        dash.resize(SurfaceSize::new(640, 480), &mut surface);
        assert_eq!(surface.size(), SurfaceSize::new(640, 480));
    }

    #[test]
    fn missing_surface_skips_frame_without_advancing() {
        let (mut dash, _host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));
        dash.region_clicked("chinaz-center", 0.0, &mut map).expect("click");

        let report = dash.frame(16.0, &map, no_surface()).expect("running");
        assert_eq!(report.beam, None);
        assert_eq!(dash.state().beam.progress(), 0.0);

        let mut surface = RecordingSurface::default();
        dash.frame(32.0, &map, Some(&mut surface));
        assert!(dash.state().beam.progress() > 0.0);
    }

    #[test]
    fn stale_pulse_hide_does_not_hide_newer_pulse() {
        let (mut dash, _host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));

        let first = dash.region_clicked("chinaz-center", 0.0, &mut map).expect("first");
        let second = dash.region_clicked("chinaz-north", 1_000.0, &mut map).expect("second");

        // First pulse's hide fires at 1800ms while the second pulse is up.
        dash.frame(1_800.0, &map, no_surface());
        let visible = dash.state().pulse.visible().map(|p| p.generation);
        assert_eq!(visible, Some(second.pulse));
        assert!(dash.events().iter().any(|e| e.event
            == DashboardEvent::PulseHideIgnored {
                generation: first.pulse
            }));

        dash.frame(2_800.0, &map, no_surface());
        assert!(dash.state().pulse.visible().is_none());
    }

    #[test]
    fn unknown_region_changes_nothing() {
        let (mut dash, host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));
        let err = dash.region_clicked("nowhere", 0.0, &mut map);
        assert_eq!(err, Err(DashboardError::UnknownRegion("nowhere".to_string())));
        assert!(dash.state().selection.current().is_none());
        assert!(host.log.borrow().rendered.is_empty());
        assert!(map.flights.is_empty());
    }

    #[test]
    fn region_without_outline_is_rejected_without_side_effects() {
        let mut hollow = region_with("hollow", RegionAttributes::default());
        hollow.rings.clear();
        let host = FakeHost::default();
        let mut dash = Dashboard::new(
            DashboardConfig::default(),
            RegionSet::new(vec![hollow]),
            host.clone(),
            3,
        );
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));

        let err = dash.region_clicked("hollow", 0.0, &mut map);
        assert_eq!(err, Err(DashboardError::EmptyGeometry("hollow".to_string())));
        assert!(dash.state().selection.current().is_none());
        assert!(!dash.state().beam.is_active());
        assert!(dash.state().pulse.visible().is_none());
        assert!(host.log.borrow().rendered.is_empty());
        assert!(map.flights.is_empty());
    }

    #[test]
    fn region_without_votes_binds_empty_charts() {
        let (mut dash, host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));
        dash.region_clicked("Chinaz Riverside", 0.0, &mut map).expect("click");
        let log = host.log.borrow();
        assert_eq!(log.rendered.len(), 2);
        assert!(log.rendered.iter().all(|spec| spec.labels.is_empty()));
    }

    #[test]
    fn teardown_stops_loop_and_releases_charts() {
        let (mut dash, host) = mount();
        let mut map = FakeMap::new(SurfaceSize::new(800, 600));
        let mut surface = RecordingSurface::default();
        dash.region_clicked("chinaz-center", 0.0, &mut map).expect("click");

        dash.teardown();
        assert!(!dash.is_running());
        assert!(host.log.borrow().live.is_empty());
        assert_eq!(dash.frame(16.0, &map, Some(&mut surface)), None);
        assert!(surface.ops.is_empty());

        dash.teardown();
        let torn = dash
            .events()
            .iter()
            .filter(|e| e.event == DashboardEvent::TornDown)
            .count();
        assert_eq!(torn, 1);
    }
}
