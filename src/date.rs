//! Best-effort due date parsing.
//!
//! Due dates arrive either as calendar dates or as free-form strings.
//! Parsing never fails: a string that is not ISO-8601 simply yields no
//! date. Callers that need to warn about malformed input check
//! [`is_unparsable`] separately.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// A due date as supplied by the caller.
///
/// Text values are echoed back unchanged in scored output, even when they
/// cannot be parsed. Deserialized input is always kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DueDate {
    /// An already-typed calendar date.
    Date(NaiveDate),
    /// Raw text, parsed lazily.
    Text(String),
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(DueDate::Text)
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        DueDate::Date(date)
    }
}

impl From<&str> for DueDate {
    fn from(text: &str) -> Self {
        DueDate::Text(text.to_string())
    }
}

impl From<String> for DueDate {
    fn from(text: String) -> Self {
        DueDate::Text(text)
    }
}

/// Parses an ISO-8601 string into a calendar date.
///
/// The date part is either a calendar date (`2025-03-14`, `20250314`) or
/// an ISO week date (`2025-W11-5`, `2025W115`). It may be followed by any
/// single separator character and a time of day (`HH`, `HH:MM`,
/// `HH:MM:SS[.f]`, `HHMM`, `HHMMSS`) with an optional `Z` or `±HH[:MM]`
/// offset. The date is returned as written; an offset never shifts it.
/// Surrounding whitespace makes the string invalid.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let len = match text.as_bytes().get(4)? {
        b'-' => 10,
        _ => 8,
    };
    let date = parse_date_part(text.get(..len)?, len == 10)?;

    let mut rest = text.get(len..)?.chars();
    match rest.next() {
        None => Some(date),
        Some(_separator) => is_valid_time(rest.as_str()).then_some(date),
    }
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_date_part(s: &str, extended: bool) -> Option<NaiveDate> {
    let year = digits(s.get(..4)?)? as i32;
    let mut rest = s.get(4..)?;
    if extended {
        rest = rest.strip_prefix('-')?;
    }

    if let Some(week_rest) = rest.strip_prefix('W') {
        let week = digits(week_rest.get(..2)?)?;
        let mut day = week_rest.get(2..)?;
        if extended {
            day = day.strip_prefix('-')?;
        }
        if day.len() != 1 {
            return None;
        }
        let weekday = match digits(day)? {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            7 => Weekday::Sun,
            _ => return None,
        };
        return NaiveDate::from_isoywd_opt(year, week, weekday);
    }

    let month = digits(rest.get(..2)?)?;
    let mut day = rest.get(2..)?;
    if extended {
        day = day.strip_prefix('-')?;
    }
    if day.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, digits(day)?)
}

fn is_valid_time(s: &str) -> bool {
    let (clock, offset) = match s.find(|c: char| matches!(c, 'Z' | '+' | '-')) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    };
    let offset_ok = match offset {
        "" | "Z" => true,
        _ => parse_clock(&offset[1..]).is_some(),
    };
    offset_ok && parse_clock(clock).is_some()
}

/// Parses `HH[:MM[:SS[.f]]]` or its compact form `HH[MM[SS[.f]]]`.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    let (hms, fraction) = match s.find(|c: char| c == '.' || c == ',') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let fields: Vec<&str> = if hms.contains(':') {
        hms.split(':').collect()
    } else {
        (0..hms.len())
            .step_by(2)
            .map(|i| hms.get(i..i + 2))
            .collect::<Option<Vec<_>>>()?
    };
    if fields.is_empty() || fields.len() > 3 || fields.iter().any(|f| f.len() != 2) {
        return None;
    }
    if let Some(fraction) = fraction {
        if fields.len() != 3
            || fraction.is_empty()
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
    }

    let field = |i: usize| fields.get(i).map_or(Some(0), |f| digits(f));
    NaiveTime::from_hms_opt(field(0)?, field(1)?, field(2)?)
}

/// Resolves an optional due date to a calendar date.
pub fn parse_due_date(due: Option<&DueDate>) -> Option<NaiveDate> {
    match due? {
        DueDate::Date(date) => Some(*date),
        DueDate::Text(text) => parse_iso_date(text),
    }
}

/// Returns `true` if a non-empty due date string was supplied but did not parse.
///
/// Absent dates and the empty string are not considered malformed;
/// whitespace-only strings are.
pub fn is_unparsable(due: Option<&DueDate>) -> bool {
    match due {
        Some(DueDate::Text(text)) => !text.is_empty() && parse_iso_date(text).is_none(),
        _ => false,
    }
}
