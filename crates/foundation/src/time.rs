/// Time primitives
///
/// The engine timebase is milliseconds: animation durations and poll periods
/// are specified in ms, so keeping a single unit avoids conversion drift.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // milliseconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn millis(self) -> f64 {
        self.0
    }

    /// Elapsed milliseconds since `earlier`. Never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}
