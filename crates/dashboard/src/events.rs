use foundation::LonLat;
use formats::RegionId;

use crate::projection::SurfaceSize;
use crate::pulse::PulseGeneration;

/// Trace of what the view did, stamped with the frame index by the event bus.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SelectionChanged { region: RegionId },
    BeamStarted { destination: LonLat, replaced: bool },
    BeamArrived { destination: LonLat },
    FlyToRequested { center: LonLat, zoom: f64 },
    PulseShown { generation: PulseGeneration },
    PulseHidden { generation: PulseGeneration },
    /// A hide timer fired after a newer pulse replaced its target.
    PulseHideIgnored { generation: PulseGeneration },
    PanelRebound { region: RegionId, president: usize, vice: usize, tiles: usize },
    OverlayResized { size: SurfaceSize },
    /// The overlay surface was unavailable; the frame did nothing.
    FrameSkipped,
    TornDown,
}
