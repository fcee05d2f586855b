// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device listing parsing.
//!
//! `GET /User/ListDevices` returns the account topology as a tree of
//! buildings, floors and areas with devices attached at every level.
//! [`Building::entries`] flattens that tree into document order.

use serde::Deserialize;

use super::DeviceState;

/// One building in the account topology.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Building {
    /// Building id; devices below this node belong to it.
    #[serde(rename = "ID", default)]
    pub id: u32,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// The nested floor/area/device tree.
    #[serde(default)]
    pub structure: Structure,
}

impl Building {
    /// Flattens this building's tree into one ordered sequence of device
    /// entries: directly attached devices first, then floors (their devices,
    /// then their areas'), then top-level areas.
    pub fn entries(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.structure
            .devices
            .iter()
            .chain(self.structure.floors.iter().flat_map(|floor| {
                floor
                    .devices
                    .iter()
                    .chain(floor.areas.iter().flat_map(|area| area.devices.iter()))
            }))
            .chain(
                self.structure
                    .areas
                    .iter()
                    .flat_map(|area| area.devices.iter()),
            )
    }
}

/// The nested structure of a building.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Structure {
    /// Floors within the building.
    #[serde(default)]
    pub floors: Vec<Floor>,

    /// Areas attached directly to the building.
    #[serde(default)]
    pub areas: Vec<Area>,

    /// Devices attached directly to the building.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// One floor within a building.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Floor {
    /// Areas on this floor.
    #[serde(default)]
    pub areas: Vec<Area>,

    /// Devices attached directly to the floor.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// One area within a building or floor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Area {
    /// Devices in this area.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// One device entry in the listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceEntry {
    /// Numeric device id.
    #[serde(rename = "DeviceID", default)]
    pub device_id: u32,

    /// Display name.
    #[serde(default)]
    pub device_name: String,

    /// Owning building id.
    #[serde(rename = "BuildingID", default)]
    pub building_id: u32,

    /// The device's full state record.
    #[serde(default)]
    pub device: DeviceState,
}
