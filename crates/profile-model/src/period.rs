//! Employment period parsing.
//!
//! Canonical periods are human-entered range strings like
//! `"2020.01 ~ 2021.02"` or `"2024.03 ~ 현재"`. Platforms want wire dates
//! (`YYYY-MM-01`), with an open end for ongoing positions.
//!
//! Parsing is total: a malformed piece is trimmed and passed through
//! unchanged so a single bad date field never aborts an otherwise healthy
//! run. The bad value then surfaces in the diff instead of disappearing.

use serde::{Deserialize, Serialize};

/// Marker tokens meaning "still ongoing" on the right-hand side of a range.
const PRESENT_MARKERS: [&str; 2] = ["현재", "present"];

/// A parsed employment period.
///
/// `ends_at == None` means the position is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub starts_at: String,
    pub ends_at: Option<String>,
}

/// Parse a period range string into wire dates.
///
/// Splits on `~`, trims both sides, and maps `YYYY.MM` to `YYYY-MM-01`.
/// A right-hand present marker (`현재` / `present`, case-insensitive)
/// yields `ends_at = None`, as does a missing right-hand side.
pub fn parse_period(text: &str) -> Period {
    let mut parts = text.splitn(2, '~');
    let starts_at = month_to_wire_date(parts.next().unwrap_or("").trim());

    let ends_at = match parts.next().map(str::trim) {
        None | Some("") => None,
        Some(end) if is_present_marker(end) => None,
        Some(end) => Some(month_to_wire_date(end)),
    };

    Period { starts_at, ends_at }
}

fn is_present_marker(token: &str) -> bool {
    PRESENT_MARKERS
        .iter()
        .any(|m| token.eq_ignore_ascii_case(m))
}

/// Map `YYYY.MM` to `YYYY-MM-01`; anything else passes through unchanged.
fn month_to_wire_date(token: &str) -> String {
    let Some((year, month)) = token.split_once('.') else {
        return token.to_string();
    };
    if year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && (1..=2).contains(&month.len())
        && month.chars().all(|c| c.is_ascii_digit())
    {
        format!("{year}-{month:0>2}-01")
    } else {
        token.to_string()
    }
}
