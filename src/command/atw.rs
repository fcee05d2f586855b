// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heat-pump command encoding.

use serde::Serialize;

use crate::device::Device;
use crate::error::{Error, ValueError};
use crate::types::DeviceType;

/// A partial update for a heat-pump device.
///
/// `None` fields are left unchanged. Zone-2 fields are rejected at encode
/// time when the target device reports no second zone.
///
/// # Examples
///
/// ```
/// use melcloud_lib::command::AtwSettings;
///
/// let settings = AtwSettings::new()
///     .with_tank_temperature(50.0)
///     .with_zone1_temperature(21.0);
/// assert!(!settings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtwSettings {
    /// Power on/off.
    pub power: Option<bool>,
    /// Forced hot-water mode.
    pub forced_hot_water: Option<bool>,
    /// Zone 1 operation mode code.
    pub zone1_mode: Option<i32>,
    /// Zone 2 operation mode code.
    pub zone2_mode: Option<i32>,
    /// Tank target temperature.
    pub tank_temperature: Option<f64>,
    /// Zone 1 target temperature.
    pub zone1_temperature: Option<f64>,
    /// Zone 2 target temperature.
    pub zone2_temperature: Option<f64>,
    /// Zone 1 heating flow setpoint.
    pub zone1_heat_flow: Option<f64>,
    /// Zone 2 heating flow setpoint.
    pub zone2_heat_flow: Option<f64>,
    /// Zone 1 cooling flow setpoint.
    pub zone1_cool_flow: Option<f64>,
    /// Zone 2 cooling flow setpoint.
    pub zone2_cool_flow: Option<f64>,
}

impl AtwSettings {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the power state.
    #[must_use]
    pub fn with_power(mut self, power: bool) -> Self {
        self.power = Some(power);
        self
    }

    /// Sets forced hot-water mode.
    #[must_use]
    pub fn with_forced_hot_water(mut self, forced: bool) -> Self {
        self.forced_hot_water = Some(forced);
        self
    }

    /// Sets the zone 1 operation mode code.
    #[must_use]
    pub fn with_zone1_mode(mut self, mode: i32) -> Self {
        self.zone1_mode = Some(mode);
        self
    }

    /// Sets the zone 2 operation mode code.
    #[must_use]
    pub fn with_zone2_mode(mut self, mode: i32) -> Self {
        self.zone2_mode = Some(mode);
        self
    }

    /// Sets the tank target temperature.
    #[must_use]
    pub fn with_tank_temperature(mut self, temperature: f64) -> Self {
        self.tank_temperature = Some(temperature);
        self
    }

    /// Sets the zone 1 target temperature.
    #[must_use]
    pub fn with_zone1_temperature(mut self, temperature: f64) -> Self {
        self.zone1_temperature = Some(temperature);
        self
    }

    /// Sets the zone 2 target temperature.
    #[must_use]
    pub fn with_zone2_temperature(mut self, temperature: f64) -> Self {
        self.zone2_temperature = Some(temperature);
        self
    }

    /// Sets the zone 1 heating flow setpoint.
    #[must_use]
    pub fn with_zone1_heat_flow(mut self, temperature: f64) -> Self {
        self.zone1_heat_flow = Some(temperature);
        self
    }

    /// Sets the zone 2 heating flow setpoint.
    #[must_use]
    pub fn with_zone2_heat_flow(mut self, temperature: f64) -> Self {
        self.zone2_heat_flow = Some(temperature);
        self
    }

    /// Sets the zone 1 cooling flow setpoint.
    #[must_use]
    pub fn with_zone1_cool_flow(mut self, temperature: f64) -> Self {
        self.zone1_cool_flow = Some(temperature);
        self
    }

    /// Sets the zone 2 cooling flow setpoint.
    #[must_use]
    pub fn with_zone2_cool_flow(mut self, temperature: f64) -> Self {
        self.zone2_cool_flow = Some(temperature);
        self
    }

    /// Returns whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.power.is_none()
            && self.forced_hot_water.is_none()
            && self.zone1_mode.is_none()
            && self.zone2_mode.is_none()
            && self.tank_temperature.is_none()
            && self.zone1_temperature.is_none()
            && self.zone2_temperature.is_none()
            && self.zone1_heat_flow.is_none()
            && self.zone2_heat_flow.is_none()
            && self.zone1_cool_flow.is_none()
            && self.zone2_cool_flow.is_none()
    }

    /// Returns whether any zone-2-specific field is set.
    #[must_use]
    pub const fn touches_zone2(&self) -> bool {
        self.zone2_mode.is_some()
            || self.zone2_temperature.is_some()
            || self.zone2_heat_flow.is_some()
            || self.zone2_cool_flow.is_some()
    }
}

/// The full-record payload for `POST /Device/SetAtw`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetAtwPayload {
    /// Bitmask of the fields the service should apply.
    pub effective_flags: u32,

    /// Target device id.
    #[serde(rename = "DeviceID")]
    pub device_id: u32,

    /// Power state.
    pub power: bool,

    /// Forced hot-water mode.
    pub forced_hot_water_mode: bool,

    /// Zone 1 operation mode code.
    pub operation_mode_zone1: i32,

    /// Zone 2 operation mode code.
    pub operation_mode_zone2: i32,

    /// Tank target temperature.
    pub set_tank_water_temperature: f64,

    /// Zone 1 target temperature.
    pub set_temperature_zone1: f64,

    /// Zone 2 target temperature.
    pub set_temperature_zone2: f64,

    /// Zone 1 heating flow setpoint.
    pub set_heat_flow_temperature_zone1: f64,

    /// Zone 2 heating flow setpoint.
    pub set_heat_flow_temperature_zone2: f64,

    /// Zone 1 cooling flow setpoint.
    pub set_cool_flow_temperature_zone1: f64,

    /// Zone 2 cooling flow setpoint.
    pub set_cool_flow_temperature_zone2: f64,

    /// Marks the record as a pending command for the unit.
    pub has_pending_command: bool,
}

impl SetAtwPayload {
    /// Field bit for power.
    pub const FLAG_POWER: u32 = 0x01;
    /// Field bit for forced hot water.
    pub const FLAG_FORCED_HOT_WATER: u32 = 0x02;
    /// Field bit for zone 1 mode.
    pub const FLAG_ZONE1_MODE: u32 = 0x04;
    /// Field bit for zone 2 mode.
    pub const FLAG_ZONE2_MODE: u32 = 0x08;
    /// Field bit for tank temperature.
    pub const FLAG_TANK_TEMPERATURE: u32 = 0x10;
    /// Field bit for zone 1 temperature.
    pub const FLAG_ZONE1_TEMPERATURE: u32 = 0x20;
    /// Field bit for zone 2 temperature.
    pub const FLAG_ZONE2_TEMPERATURE: u32 = 0x40;
    /// Field bit for zone 1 heating flow.
    pub const FLAG_ZONE1_HEAT_FLOW: u32 = 0x80;
    /// Field bit for zone 2 heating flow.
    pub const FLAG_ZONE2_HEAT_FLOW: u32 = 0x100;
    /// Field bit for zone 1 cooling flow.
    pub const FLAG_ZONE1_COOL_FLOW: u32 = 0x200;
    /// Field bit for zone 2 cooling flow.
    pub const FLAG_ZONE2_COOL_FLOW: u32 = 0x400;

    /// Encodes a partial update against the device's current state.
    ///
    /// # Errors
    ///
    /// - [`ValueError::WrongDeviceType`] if the device is not a heat pump.
    /// - [`ValueError::NoSecondZone`] if a zone-2 field is supplied for a
    ///   single-zone unit.
    /// - [`ValueError::EmptyUpdate`] if no field is supplied.
    pub fn encode(device: &Device, settings: &AtwSettings) -> Result<Self, Error> {
        let status = device.as_heat_pump().ok_or_else(|| ValueError::WrongDeviceType {
            expected: DeviceType::HeatPump,
            actual: device.device_type,
        })?;

        if settings.touches_zone2() && !status.has_zone2 {
            return Err(ValueError::NoSecondZone.into());
        }

        let zone2 = status.zone2.as_ref();
        let mut payload = Self {
            effective_flags: 0,
            device_id: device.id,
            power: status.power,
            forced_hot_water_mode: status.forced_hot_water,
            operation_mode_zone1: status.zone1.mode,
            operation_mode_zone2: zone2.map_or(0, |z| z.mode),
            set_tank_water_temperature: status.tank_target_temperature,
            set_temperature_zone1: status.zone1.target_temperature,
            set_temperature_zone2: zone2.map_or(0.0, |z| z.target_temperature),
            set_heat_flow_temperature_zone1: status.zone1.heat_flow_temperature,
            set_heat_flow_temperature_zone2: zone2.map_or(0.0, |z| z.heat_flow_temperature),
            set_cool_flow_temperature_zone1: status.zone1.cool_flow_temperature,
            set_cool_flow_temperature_zone2: zone2.map_or(0.0, |z| z.cool_flow_temperature),
            has_pending_command: true,
        };

        if let Some(power) = settings.power {
            payload.power = power;
            payload.effective_flags |= Self::FLAG_POWER;
        }
        if let Some(forced) = settings.forced_hot_water {
            payload.forced_hot_water_mode = forced;
            payload.effective_flags |= Self::FLAG_FORCED_HOT_WATER;
        }
        if let Some(mode) = settings.zone1_mode {
            payload.operation_mode_zone1 = mode;
            payload.effective_flags |= Self::FLAG_ZONE1_MODE;
        }
        if let Some(mode) = settings.zone2_mode {
            payload.operation_mode_zone2 = mode;
            payload.effective_flags |= Self::FLAG_ZONE2_MODE;
        }
        if let Some(temperature) = settings.tank_temperature {
            payload.set_tank_water_temperature = temperature;
            payload.effective_flags |= Self::FLAG_TANK_TEMPERATURE;
        }
        if let Some(temperature) = settings.zone1_temperature {
            payload.set_temperature_zone1 = temperature;
            payload.effective_flags |= Self::FLAG_ZONE1_TEMPERATURE;
        }
        if let Some(temperature) = settings.zone2_temperature {
            payload.set_temperature_zone2 = temperature;
            payload.effective_flags |= Self::FLAG_ZONE2_TEMPERATURE;
        }
        if let Some(temperature) = settings.zone1_heat_flow {
            payload.set_heat_flow_temperature_zone1 = temperature;
            payload.effective_flags |= Self::FLAG_ZONE1_HEAT_FLOW;
        }
        if let Some(temperature) = settings.zone2_heat_flow {
            payload.set_heat_flow_temperature_zone2 = temperature;
            payload.effective_flags |= Self::FLAG_ZONE2_HEAT_FLOW;
        }
        if let Some(temperature) = settings.zone1_cool_flow {
            payload.set_cool_flow_temperature_zone1 = temperature;
            payload.effective_flags |= Self::FLAG_ZONE1_COOL_FLOW;
        }
        if let Some(temperature) = settings.zone2_cool_flow {
            payload.set_cool_flow_temperature_zone2 = temperature;
            payload.effective_flags |= Self::FLAG_ZONE2_COOL_FLOW;
        }

        if payload.effective_flags == 0 {
            return Err(ValueError::EmptyUpdate.into());
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::DeviceState;

    fn heat_pump(has_zone2: bool) -> Device {
        let json = format!(
            r#"{{
                "DeviceID": 202,
                "DeviceType": 1,
                "Power": true,
                "ForcedHotWaterMode": false,
                "HasZone2": {has_zone2},
                "SetTemperatureZone1": 21.0,
                "SetTemperatureZone2": 19.0,
                "OperationModeZone1": 1,
                "OperationModeZone2": 2,
                "SetTankWaterTemperature": 48.0,
                "SetHeatFlowTemperatureZone1": 35.0,
                "SetCoolFlowTemperatureZone1": 18.0
            }}"#
        );
        let state: DeviceState = serde_json::from_str(&json).unwrap();
        Device::from_state(&state, 11)
    }

    #[test]
    fn mask_matches_supplied_fields_exactly() {
        let settings = AtwSettings::new()
            .with_forced_hot_water(true)
            .with_tank_temperature(50.0)
            .with_zone1_temperature(22.0);
        let payload = SetAtwPayload::encode(&heat_pump(true), &settings).unwrap();

        assert_eq!(
            payload.effective_flags,
            SetAtwPayload::FLAG_FORCED_HOT_WATER
                | SetAtwPayload::FLAG_TANK_TEMPERATURE
                | SetAtwPayload::FLAG_ZONE1_TEMPERATURE
        );
        assert_eq!(payload.effective_flags.count_ones(), 3);
    }

    #[test]
    fn unsupplied_fields_are_seeded_from_current_state() {
        let settings = AtwSettings::new().with_power(false);
        let payload = SetAtwPayload::encode(&heat_pump(true), &settings).unwrap();

        assert!(!payload.power);
        assert!(!payload.forced_hot_water_mode);
        assert_eq!(payload.operation_mode_zone1, 1);
        assert_eq!(payload.operation_mode_zone2, 2);
        assert!((payload.set_tank_water_temperature - 48.0).abs() < f64::EPSILON);
        assert!((payload.set_temperature_zone1 - 21.0).abs() < f64::EPSILON);
        assert!((payload.set_temperature_zone2 - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zone2_fields_rejected_on_single_zone_unit() {
        for settings in [
            AtwSettings::new().with_zone2_temperature(20.0),
            AtwSettings::new().with_zone2_mode(1),
            AtwSettings::new().with_zone2_heat_flow(35.0),
            AtwSettings::new().with_zone2_cool_flow(18.0),
        ] {
            let err = SetAtwPayload::encode(&heat_pump(false), &settings).unwrap_err();
            assert!(matches!(err, Error::Value(ValueError::NoSecondZone)));
        }
    }

    #[test]
    fn zone1_fields_fine_on_single_zone_unit() {
        let settings = AtwSettings::new().with_zone1_temperature(23.0);
        let payload = SetAtwPayload::encode(&heat_pump(false), &settings).unwrap();
        assert_eq!(payload.effective_flags, SetAtwPayload::FLAG_ZONE1_TEMPERATURE);
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = SetAtwPayload::encode(&heat_pump(true), &AtwSettings::new()).unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::EmptyUpdate)));
    }

    #[test]
    fn encode_rejects_air_conditioner_target() {
        let state: DeviceState =
            serde_json::from_str(r#"{"DeviceID": 9, "DeviceType": 0}"#).unwrap();
        let device = Device::from_state(&state, 1);

        let err =
            SetAtwPayload::encode(&device, &AtwSettings::new().with_power(true)).unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::WrongDeviceType { .. })
        ));
    }

    #[test]
    fn all_fields_set_all_bits() {
        let settings = AtwSettings::new()
            .with_power(true)
            .with_forced_hot_water(true)
            .with_zone1_mode(0)
            .with_zone2_mode(0)
            .with_tank_temperature(50.0)
            .with_zone1_temperature(21.0)
            .with_zone2_temperature(19.0)
            .with_zone1_heat_flow(35.0)
            .with_zone2_heat_flow(35.0)
            .with_zone1_cool_flow(18.0)
            .with_zone2_cool_flow(18.0);
        let payload = SetAtwPayload::encode(&heat_pump(true), &settings).unwrap();
        assert_eq!(payload.effective_flags, 0x7FF);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let settings = AtwSettings::new().with_tank_temperature(52.0);
        let payload = SetAtwPayload::encode(&heat_pump(true), &settings).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["DeviceID"], serde_json::json!(202));
        assert_eq!(json["EffectiveFlags"], serde_json::json!(0x10));
        assert_eq!(json["SetTankWaterTemperature"], serde_json::json!(52.0));
        assert_eq!(json["HasPendingCommand"], serde_json::json!(true));
    }
}
