//! Trigger — when a scheduled task fires.
//!
//! Next-run computation and cron parsing belong to the backend; this module
//! only describes and sanity-checks triggers.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{Timestamp, iso8601};

/// Discriminant of a [`TriggerConfig`], sent alongside it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Cron,
    Date,
    Interval,
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cron => "cron",
            Self::Date => "date",
            Self::Interval => "interval",
        })
    }
}

/// Describes when a scheduled task runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerConfig {
    /// Fires on a cron expression (e.g. `"0 8 * * *"`).
    Cron { cron: String },
    /// Fires once at `run_date`.
    Date {
        #[serde(with = "iso8601")]
        run_date: Timestamp,
    },
    /// Fires every period, optionally bounded.
    Interval(IntervalTrigger),
}

/// Recurring period with optional bounds.
///
/// An interval with every unit absent is accepted as-is; its meaning is up
/// to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalTrigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    #[serde(
        default,
        with = "iso8601::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Timestamp>,
    #[serde(
        default,
        with = "iso8601::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Timestamp>,
}

impl IntervalTrigger {
    /// Total period, or `None` when no unit is set (or the sum overflows).
    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        let units = [
            (self.weeks, Duration::weeks(1)),
            (self.days, Duration::days(1)),
            (self.hours, Duration::hours(1)),
            (self.minutes, Duration::minutes(1)),
            (self.seconds, Duration::seconds(1)),
        ];
        let mut total: Option<Duration> = None;
        for (count, unit) in units {
            let Some(count) = count else { continue };
            let part = unit.checked_mul(i32::try_from(count).ok()?)?;
            total = Some(total.unwrap_or_else(Duration::zero).checked_add(&part)?);
        }
        total
    }
}

impl TriggerConfig {
    #[must_use]
    pub fn trigger_type(&self) -> TriggerType {
        match self {
            Self::Cron { .. } => TriggerType::Cron,
            Self::Date { .. } => TriggerType::Date,
            Self::Interval(_) => TriggerType::Interval,
        }
    }

    /// Check the trigger is well-formed enough to submit.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyCron`] for a blank cron expression
    /// - [`ValidationError::InvalidTriggerWindow`] when an interval ends
    ///   before it starts
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Cron { cron } if cron.trim().is_empty() => Err(ValidationError::EmptyCron),
            Self::Interval(IntervalTrigger {
                start_date: Some(start),
                end_date: Some(end),
                ..
            }) if end < start => Err(ValidationError::InvalidTriggerWindow),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TriggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cron { cron } => write!(f, "cron({cron})"),
            Self::Date { run_date } => write!(f, "date({})", run_date.to_rfc3339()),
            Self::Interval(interval) => match interval.period() {
                Some(period) => write!(f, "interval({}s)", period.num_seconds()),
                None => f.write_str("interval(unset)"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn should_report_trigger_type_per_variant() {
        let cron = TriggerConfig::Cron {
            cron: "0 8 * * *".into(),
        };
        assert_eq!(cron.trigger_type(), TriggerType::Cron);
        let interval = TriggerConfig::Interval(IntervalTrigger::default());
        assert_eq!(interval.trigger_type(), TriggerType::Interval);
    }

    #[test]
    fn should_reject_blank_cron() {
        let trigger = TriggerConfig::Cron { cron: "  ".into() };
        assert_eq!(trigger.validate(), Err(ValidationError::EmptyCron));
    }

    #[test]
    fn should_reject_interval_ending_before_start() {
        let trigger = TriggerConfig::Interval(IntervalTrigger {
            hours: Some(1),
            start_date: Some(Utc.with_ymd_and_hms(2025, 5, 2, 0, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap()),
            ..IntervalTrigger::default()
        });
        assert_eq!(trigger.validate(), Err(ValidationError::InvalidTriggerWindow));
    }

    #[test]
    fn should_accept_interval_without_any_unit() {
        let trigger = TriggerConfig::Interval(IntervalTrigger::default());
        assert!(trigger.validate().is_ok());
        assert_eq!(trigger.to_string(), "interval(unset)");
    }

    #[test]
    fn should_sum_interval_units() {
        let interval = IntervalTrigger {
            days: Some(1),
            hours: Some(2),
            minutes: Some(30),
            ..IntervalTrigger::default()
        };
        assert_eq!(interval.period(), Some(Duration::minutes(24 * 60 + 150)));
    }

    #[test]
    fn should_parse_wire_format() {
        let json = serde_json::json!({
            "type": "interval",
            "hours": 6,
            "start_date": "2025-05-01T00:00:00"
        });
        let trigger: TriggerConfig = serde_json::from_value(json).unwrap();
        match trigger {
            TriggerConfig::Interval(interval) => {
                assert_eq!(interval.hours, Some(6));
                assert_eq!(
                    interval.start_date,
                    Some(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap())
                );
                assert!(interval.end_date.is_none());
            }
            other => panic!("expected interval, got {other:?}"),
        }

        let json = serde_json::json!({"type": "date", "run_date": "2025-05-01T08:30:00+00:00"});
        let trigger: TriggerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(trigger.trigger_type(), TriggerType::Date);
    }

    #[test]
    fn should_omit_absent_interval_fields_when_serializing() {
        let trigger = TriggerConfig::Interval(IntervalTrigger {
            minutes: Some(15),
            ..IntervalTrigger::default()
        });
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json, serde_json::json!({"type": "interval", "minutes": 15}));
    }

    #[test]
    fn should_display_trigger_variants() {
        let cron = TriggerConfig::Cron {
            cron: "0 8 * * *".into(),
        };
        assert_eq!(cron.to_string(), "cron(0 8 * * *)");
        let interval = TriggerConfig::Interval(IntervalTrigger {
            minutes: Some(2),
            ..IntervalTrigger::default()
        });
        assert_eq!(interval.to_string(), "interval(120s)");
    }
}
