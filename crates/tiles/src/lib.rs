pub mod error;
pub mod id;
pub mod image;
pub mod layer;

pub use error::*;
pub use id::*;
pub use image::*;
pub use layer::*;
