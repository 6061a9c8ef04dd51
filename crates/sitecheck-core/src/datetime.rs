//! Inspection-date normalization
//!
//! The backend stores inspection dates as full RFC 3339 timestamps, but users
//! pick plain calendar dates. Converting one to the other naively shifts the
//! date across midnight for users west or east of UTC. [`normalize_date`]
//! makes the anchoring rule explicit via [`DatePolicy`]: the calendar portion
//! of the output always equals the input.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a calendar date is anchored to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// Midnight in the machine-local timezone, serialized with its UTC offset
    LocalMidnight,
    /// Midnight in a named IANA timezone, serialized with its UTC offset
    ZoneMidnight(Tz),
    /// 12:00:00Z. Survives re-rendering in any zone within 12h of UTC.
    UtcNoon,
}

impl Display for DatePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DatePolicy::LocalMidnight => write!(f, "local-midnight"),
            DatePolicy::ZoneMidnight(tz) => write!(f, "zone-midnight:{}", tz.name()),
            DatePolicy::UtcNoon => write!(f, "utc-noon"),
        }
    }
}

impl FromStr for DatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local-midnight" => Ok(DatePolicy::LocalMidnight),
            "utc-noon" => Ok(DatePolicy::UtcNoon),
            other => {
                if let Some(zone) = other.strip_prefix("zone-midnight:") {
                    let tz = zone
                        .parse::<Tz>()
                        .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", zone))?;
                    Ok(DatePolicy::ZoneMidnight(tz))
                } else {
                    Err(anyhow::anyhow!("Invalid date policy: {}", s))
                }
            }
        }
    }
}

/// Convert a `YYYY-MM-DD` calendar date into an RFC 3339 timestamp under the
/// given policy. The first 10 characters of the output equal the input.
pub fn normalize_date(date: &str, policy: DatePolicy) -> Result<String, AppError> {
    let day = parse_calendar_date(date)?;

    match policy {
        DatePolicy::UtcNoon => {
            let noon = day.and_time(NaiveTime::MIN) + Duration::hours(12);
            Ok(Utc
                .from_utc_datetime(&noon)
                .to_rfc3339_opts(SecondsFormat::Secs, true))
        }
        DatePolicy::LocalMidnight => {
            let stamped = resolve_midnight(&Local, day)?;
            Ok(stamped.to_rfc3339_opts(SecondsFormat::Secs, false))
        }
        DatePolicy::ZoneMidnight(tz) => {
            let stamped = resolve_midnight(&tz, day)?;
            Ok(stamped.to_rfc3339_opts(SecondsFormat::Secs, false))
        }
    }
}

/// Parse and canonicality-check a calendar date string.
pub fn parse_calendar_date(date: &str) -> Result<NaiveDate, AppError> {
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| AppError::InvalidDate(format!("{}: {}", date, e)))?;

    // chrono accepts unpadded fields ("2025-6-1"); the wire format does not
    if day.format(DATE_FORMAT).to_string() != date {
        return Err(AppError::InvalidDate(format!(
            "{}: not in {} form",
            date, DATE_FORMAT
        )));
    }

    Ok(day)
}

/// The calendar portion (first 10 characters) of an RFC 3339 timestamp.
pub fn date_portion(stamp: &str) -> &str {
    stamp.get(..10).unwrap_or(stamp)
}

// Midnight may not exist on spring-forward days; take the earliest valid
// local time that day instead.
fn resolve_midnight<Z: TimeZone>(tz: &Z, day: NaiveDate) -> Result<DateTime<Z>, AppError> {
    let mut candidate = day.and_time(NaiveTime::MIN);
    let end_of_day = candidate + Duration::days(1);

    while candidate < end_of_day {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(stamped) => return Ok(stamped),
            LocalResult::Ambiguous(earliest, _) => return Ok(earliest),
            LocalResult::None => candidate = candidate + Duration::minutes(30),
        }
    }

    Err(AppError::InvalidDate(format!(
        "{}: no valid local time on this day",
        day
    )))
}
