// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device command encoding.
//!
//! The service has no true partial-update endpoint: a command must carry a
//! full state record plus an `EffectiveFlags` bitmask naming the fields to
//! apply. Encoding therefore seeds the payload from the device's current
//! decoded state, overwrites exactly the caller-supplied fields, and ORs one
//! fixed bit constant per overwritten field into the mask.
//!
//! | Command type | Endpoint | Field set |
//! |--------------|----------|-----------|
//! | [`SetAtaPayload`] | `POST /Device/SetAta` | air conditioner |
//! | [`SetAtwPayload`] | `POST /Device/SetAtw` | heat pump |
//!
//! The caller-facing halves are [`AtaSettings`] and [`AtwSettings`]:
//! plain records of optional fields, where `None` means "leave unchanged".

mod ata;
mod atw;

pub use ata::{AtaSettings, SetAtaPayload};
pub use atw::{AtwSettings, SetAtwPayload};
