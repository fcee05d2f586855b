// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for MELCloud devices.
//!
//! Every enumerated device field (operation mode, fan speed, vane position)
//! is modelled as an enum that keeps the raw numeric wire code recoverable:
//! decoding an unknown code preserves it verbatim, and encoding always
//! round-trips back to the code the service expects.

mod date;
mod device_type;
mod fan_speed;
mod mode;
mod vane;

pub use date::ReportDate;
pub use device_type::DeviceType;
pub use fan_speed::FanSpeed;
pub use mode::OperationMode;
pub use vane::{VaneAxis, VanePosition};
