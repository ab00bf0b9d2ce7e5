//! Trailing lookback windows for upstream queries.

use super::TransferDomainError;
use chrono::{DateTime, Duration, Utc};

/// Validated trailing lookback, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchWindow {
    hours: u32,
}

impl FetchWindow {
    /// Longest lookback the upstream API accepts in one query.
    pub const MAX_HOURS: u32 = 24;

    /// Window used by persistence-affecting production runs.
    pub const PRODUCTION: Self = Self { hours: 2 };

    /// Widest window, used only for diagnostic inspection.
    pub const DIAGNOSTIC: Self = Self {
        hours: Self::MAX_HOURS,
    };

    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`TransferDomainError::InvalidWindow`] when `hours` is zero or
    /// exceeds [`Self::MAX_HOURS`].
    pub const fn new(hours: u32) -> Result<Self, TransferDomainError> {
        if hours == 0 || hours > Self::MAX_HOURS {
            return Err(TransferDomainError::InvalidWindow(hours));
        }
        Ok(Self { hours })
    }

    /// Returns the lookback in hours.
    #[must_use]
    pub const fn hours(self) -> u32 {
        self.hours
    }

    /// Returns the concrete bounds of the window ending at `end`.
    #[must_use]
    pub fn ending_at(self, end: DateTime<Utc>) -> WindowBounds {
        WindowBounds {
            start: end - Duration::hours(i64::from(self.hours)),
            end,
            hours: self.hours,
        }
    }
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self::PRODUCTION
    }
}

/// Concrete start and end of one upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowBounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    hours: u32,
}

impl WindowBounds {
    /// Returns the inclusive start of the window.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the inclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the lookback the bounds were derived from.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.hours
    }
}
