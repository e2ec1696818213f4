//! Per-frame beam painting.
//!
//! Progress advances by a fixed step per tick, so the beam travels faster on
//! high refresh-rate displays. When the beam arrives it simply stops being
//! drawn on the next tick; there is no fade-out.

use foundation::{Rgba, ScreenPoint, lerp};
use rand::Rng;
use tracing::debug;

use crate::animation::{BeamAdvance, BeamState};
use crate::config::BeamConfig;
use crate::projection::Projector;
use crate::surface::{Composite, GradientStop, OverlaySurface, Stroke};

/// Cyan tail fading into a magenta head.
pub const BEAM_GRADIENT: [GradientStop; 3] = [
    GradientStop::new(0.0, Rgba::new(0, 255, 255, 0.05)),
    GradientStop::new(0.6, Rgba::new(0, 255, 255, 0.35)),
    GradientStop::new(1.0, Rgba::new(255, 150, 255, 0.9)),
];

/// Opaque near-white core drawn over the gradient.
pub const BEAM_CORE_COLOR: Rgba = Rgba::new(240, 255, 255, 1.0);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sparkle {
    pub origin: ScreenPoint,
    pub width_px: f64,
    pub height_px: f64,
    pub alpha: f32,
}

/// Everything drawn for one beam tick, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamPaint {
    pub from: ScreenPoint,
    pub head: ScreenPoint,
    pub progress: f64,
    pub width_px: f64,
    pub core_width_px: f64,
    pub sparkles: Vec<Sparkle>,
}

impl BeamPaint {
    /// Lays out one tick of the beam between already-projected endpoints.
    pub fn layout<R: Rng + ?Sized>(
        config: &BeamConfig,
        from: ScreenPoint,
        to: ScreenPoint,
        progress: f64,
        rng: &mut R,
    ) -> Self {
        let head = from.lerp(to, progress);
        let half_jitter = 0.5 * config.sparkle_jitter_px;
        let sparkles = (0..config.sparkle_count)
            .map(|_| {
                let along = rng.random::<f64>() * config.sparkle_max_fraction;
                let jitter_x = (rng.random::<f64>() - 0.5) * config.sparkle_jitter_px;
                let jitter_y = (rng.random::<f64>() - 0.5) * config.sparkle_jitter_px;
                debug_assert!(jitter_x.abs() <= half_jitter && jitter_y.abs() <= half_jitter);
                let size_span = config.sparkle_max_size_px - config.sparkle_min_size_px;
                Sparkle {
                    origin: from.lerp(head, along) + ScreenPoint::new(jitter_x, jitter_y),
                    width_px: config.sparkle_min_size_px + rng.random::<f64>() * size_span,
                    height_px: config.sparkle_min_size_px + rng.random::<f64>() * size_span,
                    alpha: rng.random::<f32>() * config.sparkle_max_alpha,
                }
            })
            .collect();

        Self {
            from,
            head,
            progress,
            width_px: lerp(config.width_start_px, config.width_end_px, progress),
            core_width_px: config.core_width_px,
            sparkles,
        }
    }

    pub fn paint<S: OverlaySurface + ?Sized>(&self, surface: &mut S) {
        surface.set_composite(Composite::Lighter);
        surface.stroke_segment(
            self.from,
            self.head,
            self.width_px,
            &Stroke::Gradient(BEAM_GRADIENT.to_vec()),
        );
        surface.stroke_segment(
            self.from,
            self.head,
            self.core_width_px,
            &Stroke::Solid(BEAM_CORE_COLOR),
        );
        for s in &self.sparkles {
            surface.fill_rect(
                s.origin,
                s.width_px,
                s.height_px,
                Rgba::WHITE.with_alpha(s.alpha),
            );
        }
        surface.set_composite(Composite::SourceOver);
    }
}

/// What one renderer tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum BeamTick {
    /// No beam in flight; the surface was cleared.
    Idle,
    /// Drew the beam at the given progress.
    Drawn(BeamPaint),
    /// Drew the final frame and deactivated the beam.
    Arrived(BeamPaint),
}

#[derive(Debug, Clone, Default)]
pub struct BeamRenderer {
    config: BeamConfig,
}

impl BeamRenderer {
    pub fn new(config: BeamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BeamConfig {
        &self.config
    }

    /// One frame: clear, advance, project both endpoints, paint.
    ///
    /// Endpoints are re-projected every call because the camera may have
    /// moved since the last frame.
    pub fn tick<P, S, R>(
        &self,
        state: &mut BeamState,
        projector: &P,
        surface: &mut S,
        rng: &mut R,
    ) -> BeamTick
    where
        P: Projector + ?Sized,
        S: OverlaySurface + ?Sized,
        R: Rng + ?Sized,
    {
        surface.clear();
        let arrived = match state.advance(self.config.step) {
            BeamAdvance::Inactive => return BeamTick::Idle,
            BeamAdvance::Running(_) => false,
            BeamAdvance::Arrived => true,
        };

        let from = projector.project(state.origin());
        let to = projector.project(state.destination());
        let paint = BeamPaint::layout(&self.config, from, to, state.progress(), rng);
        paint.paint(surface);

        if arrived {
            state.finish();
            debug!(
                lon = state.destination().lon_deg,
                lat = state.destination().lat_deg,
                "beam arrived"
            );
            BeamTick::Arrived(paint)
        } else {
            BeamTick::Drawn(paint)
        }
    }
}
