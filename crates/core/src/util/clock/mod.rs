// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use derive_more::{Display, Error};
use jiff::{civil::Date, fmt::temporal::Pieces};

// 4-digit year
pub type YearType = i16;

pub const YEAR_MIN: YearType = 1;
pub const YEAR_MAX: YearType = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid date \"{input}\"")]
pub struct InvalidDate {
    input: String,
}

impl InvalidDate {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parse a calendar date from a string.
///
/// Accepts plain dates (`YYYY-MM-DD`) as well as civil date-times and
/// RFC 3339 timestamps. The time and offset of the latter are ignored,
/// i.e. the date is taken as written. Only 4-digit years are accepted.
pub fn parse_date(input: &str) -> Result<Date, InvalidDate> {
    Pieces::parse(input.trim())
        .ok()
        .map(|pieces| pieces.date())
        .filter(|date| (YEAR_MIN..=YEAR_MAX).contains(&date.year()))
        .ok_or_else(|| InvalidDate {
            input: input.to_owned(),
        })
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.to_string()
}

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Returns `None` if the input could not be parsed.
#[must_use]
pub fn normalize_date(input: &str) -> Option<String> {
    parse_date(input).ok().map(format_date)
}
