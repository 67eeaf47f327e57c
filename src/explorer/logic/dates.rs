//! Free-text date parsing with day-first disambiguation.
//!
//! `01/02/2023` reads as 1 February 2023. When a day-first reading is
//! impossible (`12/25/2023`) the month-first reading is used instead, so a
//! column mixing both conventions still converts. Year-first values
//! (`2023-02-01`) are never ambiguous.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::types::{Column, DateColumn};
use crate::error::{ExplorerError, Result};

const YEAR_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d",
    "%Y.%m.%d",
];

const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y",
];

const DAY_FIRST_SHORT_YEAR_FORMATS: &[&str] = &[
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
];

const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
];

const MONTH_FIRST_SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%m-%d-%y", "%m.%d.%y"];

const MONTH_NAME_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
];

/// Parse one free-text date.
///
/// # Errors
///
/// A message naming the value when no known layout matches.
pub fn parse_datetime(raw: &str, day_first: bool) -> std::result::Result<NaiveDateTime, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("empty value".to_owned());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    let value = value.strip_suffix('Z').unwrap_or(value);
    candidate_formats(value, day_first)
        .into_iter()
        .find_map(|fmt| parse_with(value, fmt))
        .ok_or_else(|| format!("'{raw}' does not match any known date layout"))
}

fn parse_with(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    if fmt.contains("%H") {
        NaiveDateTime::parse_from_str(value, fmt).ok()
    } else {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    }
}

fn candidate_formats(value: &str, day_first: bool) -> Vec<&'static str> {
    let leading = value.chars().take_while(char::is_ascii_digit).count();
    if leading == 0 {
        return MONTH_NAME_FORMATS.to_vec();
    }
    if leading >= 4 {
        return YEAR_FIRST_FORMATS.to_vec();
    }

    let (first, second) = if year_digits(value) == 2 {
        (DAY_FIRST_SHORT_YEAR_FORMATS, MONTH_FIRST_SHORT_YEAR_FORMATS)
    } else {
        (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS)
    };
    let (first, second) = if day_first {
        (first, second)
    } else {
        (second, first)
    };

    first
        .iter()
        .chain(second)
        .chain(MONTH_NAME_FORMATS)
        .copied()
        .collect()
}

/// Digits in the last numeric group of the date part.
fn year_digits(value: &str) -> usize {
    let date_part = value.split([' ', 'T']).next().unwrap_or(value);
    let last = date_part.rsplit(['/', '-', '.']).next().unwrap_or(date_part);
    if last.chars().all(|c| c.is_ascii_digit()) {
        last.len()
    } else {
        0
    }
}

/// Convert a selected column to timestamps.
///
/// Datetime columns pass through. Text columns are parsed cell by cell; the
/// first cell that cannot be parsed fails the whole column.
///
/// # Errors
///
/// [`ExplorerError::DateParse`] naming the row, value and reason.
pub fn parse_date_column(column: &Column, day_first: bool) -> Result<DateColumn> {
    match column {
        Column::Datetime(c) => Ok(c.clone()),
        Column::Text(c) => {
            let mut values = Vec::with_capacity(c.values.len());
            for (row, cell) in c.values.iter().enumerate() {
                let parsed = match cell {
                    Some(raw) => Some(parse_datetime(raw, day_first).map_err(|reason| {
                        tracing::warn!(column = %c.name, row, "Date conversion failed");
                        ExplorerError::DateParse(format!("row {}: {reason}", row + 1))
                    })?),
                    None => None,
                };
                values.push(parsed);
            }
            Ok(DateColumn::new(&c.name, values))
        }
        Column::Numeric(c) => Err(ExplorerError::DateParse(format!(
            "column '{}' holds numbers, not dates",
            c.name
        ))),
    }
}
