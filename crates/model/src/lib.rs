pub mod alerts;
pub mod auth;
pub mod grid;
pub mod units;

pub use alerts::*;
pub use auth::*;
pub use grid::*;
pub use units::*;
