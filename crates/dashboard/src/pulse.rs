use foundation::{LonLat, ScreenPoint};

/// Identifies one `show` call. Hide requests carry the generation they were
/// issued for; an older generation can never hide a newer pulse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PulseGeneration(pub u64);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisiblePulse {
    pub generation: PulseGeneration,
    pub at: LonLat,
    /// Screen position captured when the pulse was shown. The marker does not
    /// follow later camera moves.
    pub screen: ScreenPoint,
}

/// Outcome of a hide request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PulseHide {
    Hidden,
    /// A newer pulse was shown after this request was issued.
    Stale,
    /// Nothing was visible.
    AlreadyHidden,
}

#[derive(Debug, Clone, Default)]
pub struct PulseMarker {
    next: u64,
    visible: Option<VisiblePulse>,
}

impl PulseMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, at: LonLat, screen: ScreenPoint) -> PulseGeneration {
        let generation = PulseGeneration(self.next);
        self.next += 1;
        self.visible = Some(VisiblePulse {
            generation,
            at,
            screen,
        });
        generation
    }

    pub fn hide(&mut self, generation: PulseGeneration) -> PulseHide {
        match self.visible {
            None => PulseHide::AlreadyHidden,
            Some(v) if v.generation != generation => PulseHide::Stale,
            Some(_) => {
                self.visible = None;
                PulseHide::Hidden
            }
        }
    }

    pub fn visible(&self) -> Option<&VisiblePulse> {
        self.visible.as_ref()
    }
}
