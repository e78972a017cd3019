use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

use crate::{RevenueError, RevenueResult};

/// Longest horizon, in days, any run or read window may cover
pub const MAX_HORIZON_DAYS: u32 = 3650;

/// Reject horizons past `MAX_HORIZON_DAYS`
pub fn check_horizon(days: u32) -> RevenueResult<u32> {
    if days > MAX_HORIZON_DAYS {
        return Err(RevenueError::Validation(format!(
            "days_ahead must be at most {}, got {}",
            MAX_HORIZON_DAYS, days
        )));
    }
    Ok(days)
}

/// Inclusive time range used to select persisted artifacts and bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// `[now, now + days]`, the read window for forecasts, allocations and
    /// recommendations.
    pub fn ahead(now: DateTime<Utc>, days: u32) -> RevenueResult<Self> {
        let days = check_horizon(days)?;
        let end = now
            .checked_add_signed(Duration::days(days as i64))
            .ok_or_else(|| RevenueError::Validation(format!("{} days past {} is out of range", days, now)))?;

        Ok(Self { start: now, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}
