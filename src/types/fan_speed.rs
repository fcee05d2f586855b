// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed for air-conditioner devices.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The fan speed of an air-conditioner device.
///
/// Code 0 means automatic; any other code is a fixed step. The number of
/// steps varies per device (reported alongside the device state), so fixed
/// speeds are not range-checked here.
///
/// # Examples
///
/// ```
/// use melcloud_lib::types::FanSpeed;
///
/// assert_eq!(FanSpeed::Auto.code(), 0);
/// assert_eq!(FanSpeed::from_code(3), FanSpeed::Fixed(3));
/// assert_eq!(FanSpeed::Fixed(3).to_string(), "3");
/// assert_eq!("auto".parse::<FanSpeed>().unwrap(), FanSpeed::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FanSpeed {
    /// Automatic fan speed (code 0).
    Auto,
    /// A fixed fan speed step (codes 1 and up).
    Fixed(u8),
}

impl FanSpeed {
    /// Returns the numeric code used by the service.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Fixed(step) => *step,
        }
    }

    /// Decodes a numeric code from the service.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Auto,
            step => Self::Fixed(step),
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fixed(step) => write!(f, "{step}"),
        }
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "a" => Ok(Self::Auto),
            other => other
                .parse::<u8>()
                .map(Self::from_code)
                .map_err(|_| ValueError::InvalidFanSpeed(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0..=5 {
            assert_eq!(FanSpeed::from_code(code).code(), code);
        }
    }

    #[test]
    fn zero_is_auto() {
        assert_eq!(FanSpeed::from_code(0), FanSpeed::Auto);
        assert_eq!(FanSpeed::Auto.to_string(), "auto");
    }

    #[test]
    fn parse_auto_and_numeric() {
        assert_eq!("AUTO".parse::<FanSpeed>().unwrap(), FanSpeed::Auto);
        assert_eq!("0".parse::<FanSpeed>().unwrap(), FanSpeed::Auto);
        assert_eq!("4".parse::<FanSpeed>().unwrap(), FanSpeed::Fixed(4));
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(
            "fast".parse::<FanSpeed>().unwrap_err(),
            ValueError::InvalidFanSpeed(_)
        ));
    }
}
