// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MELCloud` Lib - A Rust client library for the MELCloud HVAC service.
//!
//! This library provides async APIs to control Mitsubishi air conditioners
//! and heat pumps through the MELCloud JSON/HTTPS service.
//!
//! # Supported Features
//!
//! - **Authentication**: session-token login with transparent
//!   re-authentication on expiry
//! - **Device enumeration**: the full account topology, flattened
//! - **State queries**: normalized live status per device
//! - **Commands**: partial updates for air conditioners and heat pumps
//! - **Energy reports**: date-ranged consumption/production aggregates
//!
//! All remote interaction goes through a retry wrapper with exponential
//! backoff; transient failures (timeouts, 401, 429, 5xx) are retried up to
//! a configurable bound and everything else surfaces immediately.
//!
//! # Quick Start
//!
//! ```no_run
//! use melcloud_lib::{AtaSettings, Client};
//! use melcloud_lib::types::OperationMode;
//!
//! #[tokio::main]
//! async fn main() -> melcloud_lib::Result<()> {
//!     let client = Client::builder("user@example.com", "secret").build()?;
//!
//!     // Enumerate the account's devices
//!     for device in client.list_devices().await? {
//!         println!(
//!             "{} ({}): {}",
//!             device.id,
//!             device.device_type,
//!             device.name.as_deref().unwrap_or("unnamed"),
//!         );
//!     }
//!
//!     // Heat the living room to 21 degrees
//!     let settings = AtaSettings::new()
//!         .with_power(true)
//!         .with_mode(OperationMode::Heat)
//!         .with_target_temperature(21.0);
//!     let updated = client.set_device(1234, &settings, None).await?;
//!     println!("now {:?}", updated.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Partial Updates
//!
//! The service has no true partial-update endpoint: commands carry a full
//! state record plus an `EffectiveFlags` bitmask naming the fields to apply.
//! [`AtaSettings`] and [`AtwSettings`] hide this: set only the fields you
//! want changed and the client seeds the rest from the device's current
//! state.

mod client;
pub mod command;
mod device;
pub mod error;
pub mod protocol;
pub mod response;
mod retry;
mod session;
pub mod types;

pub use client::{Client, ClientBuilder};
pub use command::{AtaSettings, AtwSettings};
pub use device::{AtaStatus, AtwStatus, Connectivity, Device, DeviceStatus, Fault, ZoneStatus};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use response::EnergyReport;
pub use retry::RetryPolicy;
pub use types::{DeviceType, FanSpeed, OperationMode, ReportDate, VaneAxis, VanePosition};
