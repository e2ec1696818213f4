pub mod cancel;
pub mod event_bus;
pub mod frame;
pub mod frame_loop;
pub mod timers;

pub use cancel::*;
pub use event_bus::*;
pub use frame::*;
pub use frame_loop::*;
pub use timers::*;
