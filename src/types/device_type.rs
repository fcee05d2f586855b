// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device capability classes.

use std::fmt;

/// The capability class of a device, discriminated by the remote type code.
///
/// # Examples
///
/// ```
/// use melcloud_lib::types::DeviceType;
///
/// assert_eq!(DeviceType::from_code(0), DeviceType::AirConditioner);
/// assert_eq!(DeviceType::from_code(1), DeviceType::HeatPump);
/// assert_eq!(DeviceType::from_code(3), DeviceType::Other(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Air-to-air unit (type code 0).
    AirConditioner,
    /// Air-to-water heat pump (type code 1).
    HeatPump,
    /// A type code without a documented capability class.
    Other(i32),
}

impl DeviceType {
    /// Returns the numeric type code used by the service.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::AirConditioner => 0,
            Self::HeatPump => 1,
            Self::Other(code) => *code,
        }
    }

    /// Decodes a numeric type code from the service.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::AirConditioner,
            1 => Self::HeatPump,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AirConditioner => write!(f, "air conditioner"),
            Self::HeatPump => write!(f, "heat pump"),
            Self::Other(code) => write!(f, "unknown type {code}"),
        }
    }
}
