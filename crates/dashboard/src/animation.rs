use foundation::LonLat;

/// Progress within this distance of 1.0 snaps to exactly 1.0, so a step of
/// 0.02 finishes after 50 ticks despite float accumulation.
const PROGRESS_SNAP_EPS: f64 = 1e-9;

/// The single in-flight beam.
///
/// Written by the click handler, advanced by the frame loop. Within one run
/// `progress` only grows, and the tick that reaches 1.0 also clears `active`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BeamState {
    active: bool,
    origin: LonLat,
    destination: LonLat,
    progress: f64,
}

/// Result of advancing an active beam by one tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BeamAdvance {
    /// Nothing to advance.
    Inactive,
    /// Still travelling; progress after this tick.
    Running(f64),
    /// Reached the destination on this tick; progress is 1.0 and the beam is
    /// no longer active.
    Arrived,
}

impl BeamState {
    /// An inactive beam parked at `origin`.
    pub fn idle(origin: LonLat) -> Self {
        Self {
            active: false,
            origin,
            destination: origin,
            progress: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn origin(&self) -> LonLat {
        self.origin
    }

    pub fn destination(&self) -> LonLat {
        self.destination
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Starts a new run, discarding whatever was in flight.
    ///
    /// Returns `true` if an active beam was replaced.
    pub fn start(&mut self, origin: LonLat, destination: LonLat) -> bool {
        let replaced = self.active;
        *self = Self {
            active: true,
            origin,
            destination,
            progress: 0.0,
        };
        replaced
    }

    /// Adds `step` to progress, clamped to 1.0.
    pub fn advance(&mut self, step: f64) -> BeamAdvance {
        if !self.active {
            return BeamAdvance::Inactive;
        }
        let next = self.progress + step.max(0.0);
        self.progress = if next >= 1.0 - PROGRESS_SNAP_EPS {
            1.0
        } else {
            next
        };
        if self.progress >= 1.0 {
            BeamAdvance::Arrived
        } else {
            BeamAdvance::Running(self.progress)
        }
    }

    /// Marks the run complete. The beam keeps its endpoints and progress 1.0.
    pub fn finish(&mut self) {
        self.active = false;
    }
}
