// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation mode for air-conditioner devices.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The operation mode of an air-conditioner device.
///
/// The service encodes modes as numeric codes. Codes without a documented
/// meaning are preserved verbatim in [`OperationMode::Other`] so they can be
/// round-tripped into commands unchanged.
///
/// # Examples
///
/// ```
/// use melcloud_lib::types::OperationMode;
///
/// assert_eq!(OperationMode::Heat.code(), 1);
/// assert_eq!(OperationMode::from_code(3), OperationMode::Cold);
/// assert_eq!(OperationMode::from_code(99), OperationMode::Other(99));
///
/// // Aliases resolve case-insensitively
/// assert_eq!("HOT".parse::<OperationMode>().unwrap(), OperationMode::Heat);
/// assert_eq!("cool".parse::<OperationMode>().unwrap(), OperationMode::Cold);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationMode {
    /// Heating (code 1).
    Heat,
    /// Dehumidify (code 2).
    Dry,
    /// Cooling (code 3).
    Cold,
    /// Fan only (code 7).
    Fan,
    /// Automatic (code 8).
    Auto,
    /// An undocumented mode code, preserved verbatim.
    Other(i32),
}

impl OperationMode {
    /// Returns the numeric code used by the service.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Heat => 1,
            Self::Dry => 2,
            Self::Cold => 3,
            Self::Fan => 7,
            Self::Auto => 8,
            Self::Other(code) => *code,
        }
    }

    /// Decodes a numeric code from the service.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Heat,
            2 => Self::Dry,
            3 => Self::Cold,
            7 => Self::Fan,
            8 => Self::Auto,
            other => Self::Other(other),
        }
    }

    /// Returns the human-readable label.
    ///
    /// Undocumented codes are labelled `"unknown"`; the code itself stays
    /// available through [`OperationMode::code`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Dry => "dry",
            Self::Cold => "cold",
            Self::Fan => "fan",
            Self::Auto => "auto",
            Self::Other(_) => "unknown",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = ValueError;

    /// Resolves a mode from its documented aliases, or passes a numeric code
    /// through unchanged.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heat" | "hot" | "h" => Ok(Self::Heat),
            "dry" | "d" => Ok(Self::Dry),
            "cold" | "cool" | "c" => Ok(Self::Cold),
            "fan" | "air" | "f" => Ok(Self::Fan),
            "auto" | "a" => Ok(Self::Auto),
            other => other
                .parse::<i32>()
                .map(Self::from_code)
                .map_err(|_| ValueError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in [1, 2, 3, 7, 8, 42] {
            assert_eq!(OperationMode::from_code(code).code(), code);
        }
    }

    #[test]
    fn aliases_resolve_to_canonical_code() {
        let cases: &[(&[&str], i32)] = &[
            (&["heat", "hot", "h", "Heat", "HOT"], 1),
            (&["dry", "d", "DRY"], 2),
            (&["cold", "cool", "c", "Cool"], 3),
            (&["fan", "air", "f", "AIR"], 7),
            (&["auto", "a", "AUTO"], 8),
        ];
        for (aliases, code) in cases {
            for alias in *aliases {
                let mode: OperationMode = alias.parse().unwrap();
                assert_eq!(mode.code(), *code, "alias {alias}");
            }
        }
    }

    #[test]
    fn numeric_strings_pass_through() {
        assert_eq!("1".parse::<OperationMode>().unwrap(), OperationMode::Heat);
        assert_eq!(
            "42".parse::<OperationMode>().unwrap(),
            OperationMode::Other(42)
        );
    }

    #[test]
    fn unresolvable_alias_is_an_error() {
        let err = "warm".parse::<OperationMode>().unwrap_err();
        assert!(matches!(err, ValueError::InvalidMode(_)));
    }

    #[test]
    fn unknown_code_label() {
        let mode = OperationMode::from_code(99);
        assert_eq!(mode.as_str(), "unknown");
        assert_eq!(mode.code(), 99);
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(OperationMode::Cold.to_string(), "cold");
    }
}
