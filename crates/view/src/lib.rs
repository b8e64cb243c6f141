pub mod grid;
pub mod markers;
pub mod symbology;

pub use grid::*;
pub use markers::*;
pub use symbology::*;
