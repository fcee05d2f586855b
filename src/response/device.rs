// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The raw per-device state record.
//!
//! The same record shape appears nested in the device listing (under
//! `Device`) and as the body of `GET /Device/Get`. Air-conditioner and
//! heat-pump units share the record; each capability class populates its own
//! subset of fields, so everything class-specific is optional here.

use serde::Deserialize;

/// The full remote state record of one device.
///
/// Fields the service may omit are `Option` so that decoding can distinguish
/// "absent" from a legitimate zero value (fan speed 0 means auto, for
/// example).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceState {
    /// Numeric device id.
    #[serde(rename = "DeviceID", default)]
    pub device_id: u32,

    /// Capability class type code (0 air conditioner, 1 heat pump).
    #[serde(default)]
    pub device_type: i32,

    /// Whether the unit is powered on.
    #[serde(default)]
    pub power: bool,

    /// Whether the unit is currently unreachable from the cloud.
    #[serde(default)]
    pub offline: bool,

    // ------------------------------------------------------------------
    // Air-conditioner fields
    // ------------------------------------------------------------------
    /// Operation mode code.
    #[serde(default)]
    pub operation_mode: Option<i32>,

    /// Target temperature.
    #[serde(default)]
    pub set_temperature: Option<f64>,

    /// Measured room temperature.
    #[serde(default)]
    pub room_temperature: Option<f64>,

    /// Measured outdoor temperature.
    #[serde(default)]
    pub outdoor_temperature: Option<f64>,

    /// Requested fan speed code. Takes precedence over `fan_speed` when
    /// present, even at 0 (auto).
    #[serde(default)]
    pub set_fan_speed: Option<u8>,

    /// Reported fan speed code.
    #[serde(default)]
    pub fan_speed: Option<u8>,

    /// Number of fixed fan speed steps this unit supports.
    #[serde(default)]
    pub number_of_fan_speeds: Option<u8>,

    /// Vertical vane position code.
    #[serde(default)]
    pub vane_vertical: Option<i32>,

    /// Horizontal vane position code.
    #[serde(default)]
    pub vane_horizontal: Option<i32>,

    // ------------------------------------------------------------------
    // Heat-pump fields
    // ------------------------------------------------------------------
    /// Whether forced hot-water mode is engaged.
    #[serde(default)]
    pub forced_hot_water_mode: Option<bool>,

    /// Heat-pump operation state code (idle, hot water, heating, ...).
    #[serde(default)]
    pub operation_state: Option<i32>,

    /// Whether the unit has a second zone circuit.
    #[serde(default)]
    pub has_zone2: Option<bool>,

    /// Zone 1 target temperature.
    #[serde(default)]
    pub set_temperature_zone1: Option<f64>,

    /// Zone 2 target temperature.
    #[serde(default)]
    pub set_temperature_zone2: Option<f64>,

    /// Zone 1 measured room temperature.
    #[serde(default)]
    pub room_temperature_zone1: Option<f64>,

    /// Zone 2 measured room temperature.
    #[serde(default)]
    pub room_temperature_zone2: Option<f64>,

    /// Zone 1 operation mode code.
    #[serde(default)]
    pub operation_mode_zone1: Option<i32>,

    /// Zone 2 operation mode code.
    #[serde(default)]
    pub operation_mode_zone2: Option<i32>,

    /// Tank target temperature.
    #[serde(default)]
    pub set_tank_water_temperature: Option<f64>,

    /// Tank measured temperature.
    #[serde(default)]
    pub tank_water_temperature: Option<f64>,

    /// Zone 1 heating flow setpoint.
    #[serde(default)]
    pub set_heat_flow_temperature_zone1: Option<f64>,

    /// Zone 2 heating flow setpoint.
    #[serde(default)]
    pub set_heat_flow_temperature_zone2: Option<f64>,

    /// Zone 1 cooling flow setpoint.
    #[serde(default)]
    pub set_cool_flow_temperature_zone1: Option<f64>,

    /// Zone 2 cooling flow setpoint.
    #[serde(default)]
    pub set_cool_flow_temperature_zone2: Option<f64>,

    /// Measured flow-line temperature.
    #[serde(default)]
    pub flow_temperature: Option<f64>,

    /// Measured return-line temperature.
    #[serde(default)]
    pub return_temperature: Option<f64>,

    // ------------------------------------------------------------------
    // Connectivity and fault fields
    // ------------------------------------------------------------------
    /// Timestamp of the last contact with the cloud.
    #[serde(default)]
    pub last_communication: Option<String>,

    /// Timestamp of the next scheduled contact.
    #[serde(default)]
    pub next_communication: Option<String>,

    /// Wifi signal strength in dBm.
    #[serde(default)]
    pub wifi_signal_strength: Option<i32>,

    /// Whether the unit reports a fault.
    #[serde(default)]
    pub has_error: bool,

    /// Fault code; 8000 means no fault.
    #[serde(default)]
    pub error_code: Option<i32>,

    /// Human-readable fault description.
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_air_conditioner_state() {
        let json = r#"{
            "DeviceID": 101,
            "DeviceType": 0,
            "Power": true,
            "Offline": false,
            "OperationMode": 3,
            "SetTemperature": 21.5,
            "RoomTemperature": 23.0,
            "SetFanSpeed": 0,
            "FanSpeed": 2,
            "NumberOfFanSpeeds": 5,
            "VaneVertical": 7,
            "VaneHorizontal": 12,
            "LastCommunication": "2024-06-01T10:30:00",
            "WifiSignalStrength": -52,
            "HasError": false
        }"#;
        let state: DeviceState = serde_json::from_str(json).unwrap();
        assert_eq!(state.device_id, 101);
        assert_eq!(state.operation_mode, Some(3));
        // SetFanSpeed of 0 must survive as present, not collapse to absent
        assert_eq!(state.set_fan_speed, Some(0));
        assert_eq!(state.fan_speed, Some(2));
        assert_eq!(state.error_code, None);
    }

    #[test]
    fn parse_heat_pump_state() {
        let json = r#"{
            "DeviceID": 202,
            "DeviceType": 1,
            "Power": true,
            "ForcedHotWaterMode": false,
            "OperationState": 2,
            "HasZone2": true,
            "SetTemperatureZone1": 21.0,
            "SetTemperatureZone2": 19.0,
            "SetTankWaterTemperature": 50.0,
            "TankWaterTemperature": 48.5,
            "FlowTemperature": 35.2,
            "ReturnTemperature": 30.1
        }"#;
        let state: DeviceState = serde_json::from_str(json).unwrap();
        assert_eq!(state.device_type, 1);
        assert_eq!(state.has_zone2, Some(true));
        assert_eq!(state.set_temperature_zone2, Some(19.0));
        assert_eq!(state.operation_state, Some(2));
    }

    #[test]
    fn missing_fields_default() {
        let state: DeviceState = serde_json::from_str(r#"{"DeviceID": 1}"#).unwrap();
        assert!(!state.power);
        assert_eq!(state.set_fan_speed, None);
        assert_eq!(state.error_code, None);
        assert_eq!(state.has_zone2, None);
    }
}
