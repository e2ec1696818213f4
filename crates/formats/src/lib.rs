pub mod region;
pub mod region_source;

pub use region::*;
pub use region_source::*;
