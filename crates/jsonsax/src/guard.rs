//! Amortized length checks for the token accumulators.
//!
//! The guard never looks at the buffers itself. The parser hands it the
//! lengths of whatever is live, and the guard decides which ones are over the
//! limit and when the next check is due. Since each consumed character grows
//! an accumulator by at most one, nothing can cross the limit before
//! `position` reaches `max - longest + position_at_last_check`, so checks in
//! between are skipped.

use crate::error::BufferKind;

#[derive(Debug, Clone)]
pub(crate) struct BufferGuard {
    max: usize,
    check_at: usize,
}

impl BufferGuard {
    pub(crate) fn new(max: usize) -> Self {
        Self { max, check_at: max }
    }

    pub(crate) fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub(crate) fn is_due(&self, position: usize) -> bool {
        position >= self.check_at
    }

    /// Returns the first live buffer longer than the maximum, or re-arms the
    /// guard for the next check if there is none.
    pub(crate) fn check<I>(&mut self, position: usize, live: I) -> Option<BufferKind>
    where
        I: IntoIterator<Item = (BufferKind, usize)>,
    {
        let mut longest = 0;
        for (kind, len) in live {
            if len > self.max {
                return Some(kind);
            }
            longest = longest.max(len);
        }
        self.rearm(position, longest);
        None
    }

    pub(crate) fn rearm(&mut self, position: usize, longest: usize) {
        self.check_at = position.saturating_add(self.max - longest);
    }
}
