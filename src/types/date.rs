// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Report date validation for energy queries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ValueError;

/// A calendar date in the strict `YYYY-MM-DD` form the report endpoint
/// expects.
///
/// Parsing is stricter than chrono's `%Y-%m-%d` (which tolerates missing
/// zero-padding): the input must be exactly ten characters with digits and
/// dashes in the documented positions, and must name a real calendar date.
///
/// # Examples
///
/// ```
/// use melcloud_lib::types::ReportDate;
///
/// let date: ReportDate = "2024-01-31".parse().unwrap();
/// assert_eq!(date.to_string(), "2024-01-31");
///
/// // Missing zero-padding is rejected
/// assert!("2024-1-1".parse::<ReportDate>().is_err());
/// // So are impossible dates
/// assert!("2024-02-30".parse::<ReportDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    fn matches_pattern(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for ReportDate {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::matches_pattern(s) {
            return Err(ValueError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValueError::InvalidDate(s.to_string()))
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
