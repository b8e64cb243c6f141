use foundation::time::Time;

/// Per-tick metadata for the cooperative animation loop.
///
/// One `Frame` is produced per scheduler wake-up; the animator consumes the
/// frame's timestamp, never the wall clock directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Clock reading at the start of the frame (milliseconds).
    pub time: Time,
}

impl Frame {
    pub fn first(time: Time) -> Self {
        Self { index: 0, time }
    }

    pub fn next(self, time: Time) -> Self {
        Self {
            index: self.index + 1,
            time,
        }
    }
}
