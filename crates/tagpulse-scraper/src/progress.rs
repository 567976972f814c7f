//! Pure loop-progress bookkeeping for the scroll-collection loop, split out
//! so the termination rules are unit-testable without a browser.

/// Outcome of one scroll-height observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScrollProgress {
    /// The page grew (or shrank) since the last read; keep scrolling.
    Grew,
    /// Two consecutive reads were equal: the feed is exhausted.
    Stalled,
}

/// Tracks the last observed scroll height.
#[derive(Debug)]
pub(crate) struct ScrollTracker {
    last_height: u64,
}

impl ScrollTracker {
    pub(crate) fn new(initial_height: u64) -> Self {
        Self {
            last_height: initial_height,
        }
    }

    pub(crate) fn observe(&mut self, new_height: u64) -> ScrollProgress {
        if new_height == self.last_height {
            ScrollProgress::Stalled
        } else {
            self.last_height = new_height;
            ScrollProgress::Grew
        }
    }
}

/// Counts consecutive wait-for-content timeouts. The limit-th consecutive
/// timeout is read as end-of-results, not a failure; any successful wait
/// resets the tally.
#[derive(Debug)]
pub(crate) struct TimeoutTally {
    consecutive: u32,
    limit: u32,
}

impl TimeoutTally {
    pub(crate) fn new(limit: u32) -> Self {
        Self {
            consecutive: 0,
            limit,
        }
    }

    /// Record one timeout; returns `true` once the limit is reached.
    pub(crate) fn record(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive >= self.limit
    }

    pub(crate) fn reset(&mut self) {
        self.consecutive = 0;
    }
}
