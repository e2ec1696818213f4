pub mod layer;
pub mod region_style;
pub mod symbology;

pub use layer::*;
pub use region_style::*;
pub use symbology::*;
