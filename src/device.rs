// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized device model.
//!
//! The service returns verbose, flat state records; this module reshapes
//! them into a friendly [`Device`] with a tagged status per capability
//! class. Every enumerated field keeps its raw wire code recoverable so a
//! decoded device can seed a command payload without loss.

use chrono::NaiveDateTime;

use crate::response::{DeviceEntry, DeviceState};
use crate::types::{DeviceType, FanSpeed, OperationMode, VanePosition};

/// A normalized device.
#[derive(Debug, Clone)]
pub struct Device {
    /// Numeric device id.
    pub id: u32,

    /// Owning building id.
    pub building_id: u32,

    /// Zero-based position in the flattened device listing. `None` when the
    /// record was fetched directly rather than through the listing.
    pub index: Option<usize>,

    /// Display name. `None` when the record was fetched directly; the
    /// listing is the only source of names.
    pub name: Option<String>,

    /// Capability class.
    pub device_type: DeviceType,

    /// Live status, shaped per capability class.
    pub status: DeviceStatus,

    /// Cloud connectivity status.
    pub connectivity: Connectivity,

    /// Fault status.
    pub fault: Fault,
}

impl Device {
    /// Decodes a listing entry, stamping its position in the flattened
    /// sequence.
    #[must_use]
    pub fn from_entry(entry: &DeviceEntry, index: usize) -> Self {
        let mut device = Self::decode(&entry.device, entry.device_id, entry.building_id);
        device.index = Some(index);
        device.name = Some(entry.device_name.clone());
        device
    }

    /// Decodes a bare state record as returned by the device detail
    /// endpoint.
    #[must_use]
    pub fn from_state(state: &DeviceState, building_id: u32) -> Self {
        Self::decode(state, state.device_id, building_id)
    }

    fn decode(state: &DeviceState, id: u32, building_id: u32) -> Self {
        let device_type = DeviceType::from_code(state.device_type);
        let status = match device_type {
            DeviceType::HeatPump => DeviceStatus::HeatPump(AtwStatus::decode(state)),
            // Undocumented type codes carry the air-conditioner field layout;
            // commands still reject them on the type check.
            DeviceType::AirConditioner | DeviceType::Other(_) => {
                DeviceStatus::AirConditioner(AtaStatus::decode(state))
            }
        };

        Self {
            id,
            building_id,
            index: None,
            name: None,
            device_type,
            status,
            connectivity: Connectivity::decode(state),
            fault: Fault::decode(state),
        }
    }

    /// Returns the air-conditioner status, if this device is one.
    #[must_use]
    pub fn as_air_conditioner(&self) -> Option<&AtaStatus> {
        match &self.status {
            DeviceStatus::AirConditioner(status) => Some(status),
            DeviceStatus::HeatPump(_) => None,
        }
    }

    /// Returns the heat-pump status, if this device is one.
    #[must_use]
    pub fn as_heat_pump(&self) -> Option<&AtwStatus> {
        match &self.status {
            DeviceStatus::HeatPump(status) => Some(status),
            DeviceStatus::AirConditioner(_) => None,
        }
    }

    /// Returns whether the device is reachable from the cloud.
    #[must_use]
    pub fn is_online(&self) -> bool {
        !self.connectivity.offline
    }
}

/// Live status, tagged by capability class.
#[derive(Debug, Clone)]
pub enum DeviceStatus {
    /// Air-to-air unit.
    AirConditioner(AtaStatus),
    /// Air-to-water heat pump.
    HeatPump(AtwStatus),
}

/// Live status of an air-conditioner device.
#[derive(Debug, Clone)]
pub struct AtaStatus {
    /// Whether the unit is powered on.
    pub power: bool,

    /// Operation mode.
    pub mode: OperationMode,

    /// Target temperature.
    pub target_temperature: f64,

    /// Measured room temperature, when reported.
    pub room_temperature: Option<f64>,

    /// Measured outdoor temperature, when reported.
    pub outdoor_temperature: Option<f64>,

    /// Fan speed.
    pub fan_speed: FanSpeed,

    /// Number of fixed fan speed steps the unit supports.
    pub fan_speed_steps: u8,

    /// Vertical vane position.
    pub vane_vertical: VanePosition,

    /// Horizontal vane position.
    pub vane_horizontal: VanePosition,
}

impl AtaStatus {
    fn decode(state: &DeviceState) -> Self {
        // The requested speed wins over the reported one whenever the field
        // is present, including a present 0 (auto).
        let fan_code = state.set_fan_speed.or(state.fan_speed).unwrap_or(0);

        Self {
            power: state.power,
            mode: OperationMode::from_code(state.operation_mode.unwrap_or(0)),
            target_temperature: state.set_temperature.unwrap_or(0.0),
            room_temperature: state.room_temperature,
            outdoor_temperature: state.outdoor_temperature,
            fan_speed: FanSpeed::from_code(fan_code),
            fan_speed_steps: state.number_of_fan_speeds.unwrap_or(0),
            vane_vertical: VanePosition::from_code(state.vane_vertical.unwrap_or(0)),
            vane_horizontal: VanePosition::from_code(state.vane_horizontal.unwrap_or(0)),
        }
    }
}

/// Live status of a heat-pump device.
#[derive(Debug, Clone)]
pub struct AtwStatus {
    /// Whether the unit is powered on.
    pub power: bool,

    /// Whether forced hot-water mode is engaged.
    pub forced_hot_water: bool,

    /// Raw operation state code (idle, hot water, heating, ...).
    pub operation_state: i32,

    /// Whether the unit has a second zone circuit.
    pub has_zone2: bool,

    /// Zone 1 status.
    pub zone1: ZoneStatus,

    /// Zone 2 status; `None` on single-zone units.
    pub zone2: Option<ZoneStatus>,

    /// Tank target temperature.
    pub tank_target_temperature: f64,

    /// Tank measured temperature, when reported.
    pub tank_temperature: Option<f64>,

    /// Measured flow-line temperature, when reported.
    pub flow_temperature: Option<f64>,

    /// Measured return-line temperature, when reported.
    pub return_temperature: Option<f64>,

    /// Measured outdoor temperature, when reported.
    pub outdoor_temperature: Option<f64>,
}

impl AtwStatus {
    fn decode(state: &DeviceState) -> Self {
        let has_zone2 = state.has_zone2.unwrap_or(false);
        Self {
            power: state.power,
            forced_hot_water: state.forced_hot_water_mode.unwrap_or(false),
            operation_state: state.operation_state.unwrap_or(0),
            has_zone2,
            zone1: ZoneStatus {
                target_temperature: state.set_temperature_zone1.unwrap_or(0.0),
                room_temperature: state.room_temperature_zone1,
                mode: state.operation_mode_zone1.unwrap_or(0),
                heat_flow_temperature: state.set_heat_flow_temperature_zone1.unwrap_or(0.0),
                cool_flow_temperature: state.set_cool_flow_temperature_zone1.unwrap_or(0.0),
            },
            zone2: has_zone2.then(|| ZoneStatus {
                target_temperature: state.set_temperature_zone2.unwrap_or(0.0),
                room_temperature: state.room_temperature_zone2,
                mode: state.operation_mode_zone2.unwrap_or(0),
                heat_flow_temperature: state.set_heat_flow_temperature_zone2.unwrap_or(0.0),
                cool_flow_temperature: state.set_cool_flow_temperature_zone2.unwrap_or(0.0),
            }),
            tank_target_temperature: state.set_tank_water_temperature.unwrap_or(0.0),
            tank_temperature: state.tank_water_temperature,
            flow_temperature: state.flow_temperature,
            return_temperature: state.return_temperature,
            outdoor_temperature: state.outdoor_temperature,
        }
    }
}

/// Status of one heating/cooling zone on a heat pump.
#[derive(Debug, Clone)]
pub struct ZoneStatus {
    /// Target room temperature.
    pub target_temperature: f64,

    /// Measured room temperature, when reported.
    pub room_temperature: Option<f64>,

    /// Raw zone operation mode code.
    pub mode: i32,

    /// Heating flow setpoint.
    pub heat_flow_temperature: f64,

    /// Cooling flow setpoint.
    pub cool_flow_temperature: f64,
}

/// Cloud connectivity status of a device.
#[derive(Debug, Clone)]
pub struct Connectivity {
    /// Whether the unit is currently unreachable from the cloud.
    pub offline: bool,

    /// Last contact with the cloud.
    pub last_communication: Option<NaiveDateTime>,

    /// Next scheduled contact.
    pub next_communication: Option<NaiveDateTime>,

    /// Wifi signal strength in dBm, when reported.
    pub wifi_signal: Option<i32>,
}

impl Connectivity {
    fn decode(state: &DeviceState) -> Self {
        Self {
            offline: state.offline,
            last_communication: state
                .last_communication
                .as_deref()
                .and_then(parse_timestamp),
            next_communication: state
                .next_communication
                .as_deref()
                .and_then(parse_timestamp),
            wifi_signal: state.wifi_signal_strength,
        }
    }
}

/// Fault status of a device.
#[derive(Debug, Clone)]
pub struct Fault {
    /// Whether the unit reports a fault.
    pub has_error: bool,

    /// Fault code; [`Fault::NO_ERROR`] when the unit is healthy.
    pub code: i32,

    /// Human-readable fault description, when reported.
    pub message: Option<String>,
}

impl Fault {
    /// The code the service uses for "no fault".
    pub const NO_ERROR: i32 = 8000;

    fn decode(state: &DeviceState) -> Self {
        Self {
            has_error: state.has_error,
            code: state.error_code.unwrap_or(Self::NO_ERROR),
            message: state.error_message.clone(),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ata_state() -> DeviceState {
        serde_json::from_str(
            r#"{
                "DeviceID": 101,
                "DeviceType": 0,
                "Power": true,
                "OperationMode": 3,
                "SetTemperature": 21.5,
                "RoomTemperature": 23.0,
                "SetFanSpeed": 0,
                "FanSpeed": 2,
                "NumberOfFanSpeeds": 5,
                "VaneVertical": 7,
                "VaneHorizontal": 12,
                "LastCommunication": "2024-06-01T10:30:00.000",
                "WifiSignalStrength": -52
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_air_conditioner() {
        let device = Device::from_state(&ata_state(), 10);
        assert_eq!(device.id, 101);
        assert_eq!(device.building_id, 10);
        assert_eq!(device.device_type, DeviceType::AirConditioner);

        let status = device.as_air_conditioner().unwrap();
        assert!(status.power);
        assert_eq!(status.mode, OperationMode::Cold);
        assert!((status.target_temperature - 21.5).abs() < f64::EPSILON);
        assert_eq!(status.vane_vertical, VanePosition::Swing);
        assert_eq!(status.vane_horizontal, VanePosition::Swing);
    }

    #[test]
    fn present_zero_fan_speed_is_auto_not_fallback() {
        // SetFanSpeed: 0 with FanSpeed: 2 must decode as auto; a truthiness
        // fallback would wrongly pick 2.
        let device = Device::from_state(&ata_state(), 10);
        let status = device.as_air_conditioner().unwrap();
        assert_eq!(status.fan_speed, FanSpeed::Auto);
    }

    #[test]
    fn absent_set_fan_speed_falls_back_to_reported() {
        let mut state = ata_state();
        state.set_fan_speed = None;
        let device = Device::from_state(&state, 10);
        assert_eq!(
            device.as_air_conditioner().unwrap().fan_speed,
            FanSpeed::Fixed(2)
        );
    }

    #[test]
    fn absent_error_code_defaults_to_no_error() {
        let device = Device::from_state(&ata_state(), 10);
        assert!(!device.fault.has_error);
        assert_eq!(device.fault.code, Fault::NO_ERROR);
    }

    #[test]
    fn unknown_mode_code_is_preserved() {
        let mut state = ata_state();
        state.operation_mode = Some(42);
        let device = Device::from_state(&state, 10);
        let status = device.as_air_conditioner().unwrap();
        assert_eq!(status.mode, OperationMode::Other(42));
        assert_eq!(status.mode.as_str(), "unknown");
        assert_eq!(status.mode.code(), 42);
    }

    #[test]
    fn parses_communication_timestamps() {
        let device = Device::from_state(&ata_state(), 10);
        let last = device.connectivity.last_communication.unwrap();
        assert_eq!(last.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 10:30");
        assert_eq!(device.connectivity.wifi_signal, Some(-52));
        assert!(device.is_online());
    }

    #[test]
    fn decodes_heat_pump_with_second_zone() {
        let state: DeviceState = serde_json::from_str(
            r#"{
                "DeviceID": 202,
                "DeviceType": 1,
                "Power": true,
                "ForcedHotWaterMode": true,
                "OperationState": 2,
                "HasZone2": true,
                "SetTemperatureZone1": 21.0,
                "RoomTemperatureZone1": 20.4,
                "OperationModeZone1": 1,
                "SetTemperatureZone2": 19.0,
                "SetTankWaterTemperature": 50.0,
                "TankWaterTemperature": 48.5,
                "FlowTemperature": 35.2,
                "ReturnTemperature": 30.1
            }"#,
        )
        .unwrap();

        let device = Device::from_state(&state, 11);
        assert_eq!(device.device_type, DeviceType::HeatPump);

        let status = device.as_heat_pump().unwrap();
        assert!(status.forced_hot_water);
        assert_eq!(status.operation_state, 2);
        assert!((status.zone1.target_temperature - 21.0).abs() < f64::EPSILON);
        let zone2 = status.zone2.as_ref().unwrap();
        assert!((zone2.target_temperature - 19.0).abs() < f64::EPSILON);
        assert!((status.tank_target_temperature - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_zone_heat_pump_has_no_zone2() {
        let state: DeviceState =
            serde_json::from_str(r#"{"DeviceID": 3, "DeviceType": 1, "HasZone2": false}"#)
                .unwrap();
        let device = Device::from_state(&state, 1);
        let status = device.as_heat_pump().unwrap();
        assert!(!status.has_zone2);
        assert!(status.zone2.is_none());
    }

    #[test]
    fn accessors_reject_wrong_class() {
        let ata = Device::from_state(&ata_state(), 10);
        assert!(ata.as_heat_pump().is_none());
        assert!(ata.as_air_conditioner().is_some());
    }
}
