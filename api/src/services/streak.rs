use chrono::NaiveDate;
use serde::Serialize;

/// Gap reported for a user's first-ever activity, where there is no previous
/// date to diff against.
pub const FIRST_ACTIVITY_GAP_DAYS: i64 = 999;

/// Result of advancing the streak clock to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    /// The streak value to store if `advanced` is true.
    pub streak: i64,
    /// False exactly when today's activity was already counted.
    pub advanced: bool,
    /// Whole days between the last activity and today.
    pub gap_days: i64,
}

/// Current/best streak pair as serialized in API responses.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StreakSnapshot {
    pub current: i64,
    pub best: i64,
}

/// Computes the next streak value from the stored last-activity date.
///
/// The caller resolves `today` once per submission so a request straddling
/// midnight cannot observe two different day boundaries. A last-activity
/// date in the future (clock skew) is clamped to the same-day outcome.
pub fn next_streak(
    last_activity: Option<NaiveDate>,
    current_streak: i64,
    today: NaiveDate,
) -> StreakUpdate {
    let Some(last) = last_activity else {
        return StreakUpdate {
            streak: 1,
            advanced: true,
            gap_days: FIRST_ACTIVITY_GAP_DAYS,
        };
    };

    let gap_days = (today - last).num_days();
    if gap_days <= 0 {
        return StreakUpdate {
            streak: current_streak,
            advanced: false,
            gap_days: 0,
        };
    }
    if gap_days == 1 {
        return StreakUpdate {
            streak: current_streak + 1,
            advanced: true,
            gap_days: 1,
        };
    }
    StreakUpdate {
        streak: 1,
        advanced: true,
        gap_days,
    }
}
