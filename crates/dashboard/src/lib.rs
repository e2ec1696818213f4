//! Interactive region dashboard core.
//!
//! A click on a region selects it, fires a beam from a fixed origin to the
//! region's vertex-average centroid, pulses a marker, flies the camera there
//! and rebuilds the detail panel. A frame loop repaints the beam overlay every
//! tick, re-projecting both endpoints because the camera may be moving.
//!
//! The map, charting library and DOM are collaborators behind traits
//! ([`MapView`], [`OverlaySurface`], [`PanelHost`]).

pub mod animation;
pub mod beam;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod panel;
pub mod projection;
pub mod pulse;
pub mod selection;
pub mod surface;
pub mod tiles;

pub use animation::*;
pub use beam::*;
pub use config::*;
pub use controller::*;
pub use dashboard::*;
pub use error::*;
pub use events::*;
pub use panel::*;
pub use projection::*;
pub use pulse::*;
pub use selection::*;
pub use surface::*;
pub use tiles::*;
