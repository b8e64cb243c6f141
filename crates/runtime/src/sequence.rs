/// Identifies one issued request in a monotonically increasing series.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seq(u64);

/// Ordering guard for overlapping requests against the same piece of state.
///
/// Responses commit in completion order, but a response older than the last
/// committed one is rejected, so a later-issued-earlier-completing fetch can
/// never be overwritten by a stale straggler.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: u64,
    committed: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Seq {
        self.issued += 1;
        Seq(self.issued)
    }

    /// Commits `seq` unless something newer already committed.
    pub fn try_commit(&mut self, seq: Seq) -> bool {
        if seq.0 <= self.committed {
            return false;
        }
        self.committed = seq.0;
        true
    }

    /// Whether `seq` is the most recently issued request.
    pub fn is_latest(&self, seq: Seq) -> bool {
        seq.0 == self.issued
    }
}
