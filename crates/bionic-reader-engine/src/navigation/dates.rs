//! Calendar arithmetic over date-note ids (`MM-DD-YYYY`).
//!
//! Every function takes and returns ids as strings. Anything that does not
//! match the id pattern, or lands outside the years it allows, yields `None`.

use std::{str::FromStr, sync::OnceLock};

use chrono::{Datelike, Days, Month, Months, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::clock::Clock;

/// Furthest a nearest-existing search walks, in days.
pub const MAX_SEARCH_DAYS: u32 = 365;

/// Direction of travel through the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateDirection {
    Forward,
    Backward,
}

impl DateDirection {
    pub fn sign(self) -> i64 {
        match self {
            DateDirection::Forward => 1,
            DateDirection::Backward => -1,
        }
    }
}

fn uid_regex() -> &'static Regex {
    static DATE_UID: OnceLock<Regex> = OnceLock::new();
    DATE_UID.get_or_init(|| {
        Regex::new(r"^(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])-(19|20)[0-9][0-9]$")
            .expect("Invalid date uid regex")
    })
}

/// Whether `uid` has the shape of a date-note id.
pub fn is_date_uid(uid: &str) -> bool {
    uid_regex().is_match(uid)
}

/// Parses a date-note id. Well-formed but impossible dates (`02-30-2024`)
/// are rejected too.
pub fn uid_to_date(uid: &str) -> Option<NaiveDate> {
    if !is_date_uid(uid) {
        return None;
    }
    let month = uid[0..2].parse().ok()?;
    let day = uid[3..5].parse().ok()?;
    let year = uid[6..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date as a date-note id, or `None` outside 1900-2099.
pub fn date_to_uid(date: NaiveDate) -> Option<String> {
    let uid = format!("{:02}-{:02}-{:04}", date.month(), date.day(), date.year());
    is_date_uid(&uid).then_some(uid)
}

pub fn today_uid<C: Clock>(clock: &C) -> Option<String> {
    date_to_uid(clock.today())
}

pub fn offset_by_days(uid: &str, days: i64) -> Option<String> {
    let date = uid_to_date(uid)?;
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    }?;
    date_to_uid(shifted)
}

/// Same day `months` months away, clamped to the end of shorter months.
pub fn offset_by_months(uid: &str, months: i32) -> Option<String> {
    let date = uid_to_date(uid)?;
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    }?;
    date_to_uid(shifted)
}

/// Same day and month `years` years away; Feb 29 falls back to Feb 28.
pub fn offset_by_years(uid: &str, years: i32) -> Option<String> {
    offset_by_months(uid, years.checked_mul(12)?)
}

pub fn next_day_uid(uid: &str) -> Option<String> {
    offset_by_days(uid, 1)
}

pub fn previous_day_uid(uid: &str) -> Option<String> {
    offset_by_days(uid, -1)
}

/// Walks one day at a time from `uid` (exclusive) until `exists` accepts a
/// day, giving up after `max_steps` days.
pub fn nearest_existing(
    uid: &str,
    direction: DateDirection,
    exists: impl Fn(&str) -> bool,
    max_steps: u32,
) -> Option<String> {
    let mut current = uid.to_string();
    for _ in 0..max_steps {
        current = offset_by_days(&current, direction.sign())?;
        if exists(&current) {
            return Some(current);
        }
    }
    None
}

pub fn next_existing(uid: &str, exists: impl Fn(&str) -> bool) -> Option<String> {
    nearest_existing(uid, DateDirection::Forward, exists, MAX_SEARCH_DAYS)
}

pub fn previous_existing(uid: &str, exists: impl Fn(&str) -> bool) -> Option<String> {
    nearest_existing(uid, DateDirection::Backward, exists, MAX_SEARCH_DAYS)
}

/// Title the host gives a date note, e.g. `October 16th, 2026`.
pub fn page_title(uid: &str) -> Option<String> {
    let date = uid_to_date(uid)?;
    let day = date.day();
    let suffix = match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    };
    Some(format!("{} {day}{suffix}, {}", date.format("%B"), date.year()))
}

/// Inverse of [`page_title`].
pub fn uid_from_title(title: &str) -> Option<String> {
    let (month, rest) = title.split_once(' ')?;
    let (day, year) = rest.split_once(", ")?;
    let month = Month::from_str(month).ok()?;
    let day = day.trim_end_matches(|c: char| c.is_ascii_alphabetic()).parse().ok()?;
    let year = year.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month.number_from_month(), day)?;
    date_to_uid(date)
}
