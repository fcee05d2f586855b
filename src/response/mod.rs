// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw response records from the MELCloud service.
//!
//! These structs mirror the wire shapes one-to-one. Everything user-facing
//! goes through the normalized [`Device`](crate::Device) and
//! [`EnergyReport`](crate::EnergyReport) types instead.

mod device;
mod energy;
mod list_devices;
mod login;

pub use device::DeviceState;
pub use energy::{ConsumedEnergy, EnergyReport, ProducedEnergy, RawEnergyReport};
pub use list_devices::{Area, Building, DeviceEntry, Floor, Structure};
pub use login::{LoginData, LoginResponse};
