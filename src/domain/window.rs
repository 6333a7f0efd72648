use chrono::{DateTime, Utc};

/// A half-open activity window `[begin, end)`.
///
/// A missing `begin` means the window has always been open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub begin: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(begin: Option<DateTime<Utc>>, end: DateTime<Utc>) -> Self {
        Self { begin, end }
    }

    /// Window with a closed start, as used by games.
    #[must_use]
    pub const fn between(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(Some(begin), end)
    }

    /// `begin < end` whenever a begin is present.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.begin.is_none_or(|begin| begin < self.end)
    }

    /// Active iff `begin <= now < end`. The end instant itself is already closed.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.begin.is_none_or(|begin| begin <= now) && now < self.end
    }
}
