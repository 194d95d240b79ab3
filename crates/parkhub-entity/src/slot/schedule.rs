//! Slot availability schedule rules.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// When a schedule rule recurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "recurrence", rename_all = "snake_case")]
pub enum RecurrencePattern {
    /// Applies on every date in an inclusive range.
    DateRange {
        /// First date the rule applies.
        start_date: NaiveDate,
        /// Last date the rule applies.
        end_date: NaiveDate,
    },
    /// Applies on the listed weekdays, every week.
    Weekly {
        /// Weekdays the rule applies on.
        days: Vec<Weekday>,
    },
}

/// One time-window rule in a slot's availability schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    /// When this rule recurs.
    pub pattern: RecurrencePattern,
    /// Window start, time of day.
    pub start_time: NaiveTime,
    /// Window end, time of day.
    pub end_time: NaiveTime,
    /// Longest booking permitted inside this window, in minutes.
    pub max_duration_minutes: u32,
    /// Price per hour inside this window.
    pub hourly_price: f64,
}

impl AvailabilityRule {
    /// Check if this rule covers the given date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match &self.pattern {
            RecurrencePattern::DateRange {
                start_date,
                end_date,
            } => *start_date <= date && date <= *end_date,
            RecurrencePattern::Weekly { days } => days.contains(&date.weekday()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: RecurrencePattern) -> AvailabilityRule {
        AvailabilityRule {
            pattern,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            max_duration_minutes: 120,
            hourly_price: 4.5,
        }
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let rule = rule(RecurrencePattern::DateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        });
        assert!(rule.applies_on(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(rule.applies_on(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!rule.applies_on(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
    }

    #[test]
    fn test_weekly_matches_weekday() {
        let rule = rule(RecurrencePattern::Weekly {
            days: vec![Weekday::Mon, Weekday::Wed],
        });
        // 2025-06-02 is a Monday.
        assert!(rule.applies_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()));
        assert!(!rule.applies_on(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()));
    }
}
