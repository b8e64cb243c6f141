pub mod cancel;
pub mod clock;
pub mod frame;
pub mod metrics;
pub mod sequence;

pub use cancel::*;
pub use clock::*;
pub use frame::*;
pub use sequence::*;
