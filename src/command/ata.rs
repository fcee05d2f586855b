// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air-conditioner command encoding.

use serde::Serialize;

use crate::device::Device;
use crate::error::{Error, ValueError};
use crate::types::{DeviceType, FanSpeed, OperationMode, VaneAxis, VanePosition};

/// A partial update for an air-conditioner device.
///
/// `None` fields are left unchanged on the device. At least one field must
/// be set; encoding an empty update is a [`ValueError::EmptyUpdate`].
///
/// # Examples
///
/// ```
/// use melcloud_lib::command::AtaSettings;
/// use melcloud_lib::types::OperationMode;
///
/// let settings = AtaSettings::new()
///     .with_power(true)
///     .with_mode(OperationMode::Heat)
///     .with_target_temperature(21.0);
/// assert!(!settings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtaSettings {
    /// Power on/off.
    pub power: Option<bool>,
    /// Operation mode.
    pub mode: Option<OperationMode>,
    /// Target temperature.
    pub target_temperature: Option<f64>,
    /// Fan speed.
    pub fan_speed: Option<FanSpeed>,
    /// Vertical vane position.
    pub vane_vertical: Option<VanePosition>,
    /// Horizontal vane position.
    pub vane_horizontal: Option<VanePosition>,
}

impl AtaSettings {
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

    /// Sets the operation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OperationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the target temperature.
    #[must_use]
    pub fn with_target_temperature(mut self, temperature: f64) -> Self {
        self.target_temperature = Some(temperature);
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn with_fan_speed(mut self, speed: FanSpeed) -> Self {
        self.fan_speed = Some(speed);
        self
    }

    /// Sets the vertical vane position.
    #[must_use]
    pub fn with_vane_vertical(mut self, position: VanePosition) -> Self {
        self.vane_vertical = Some(position);
        self
    }

    /// Sets the horizontal vane position.
    #[must_use]
    pub fn with_vane_horizontal(mut self, position: VanePosition) -> Self {
        self.vane_horizontal = Some(position);
        self
    }

    /// Returns whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.power.is_none()
            && self.mode.is_none()
            && self.target_temperature.is_none()
            && self.fan_speed.is_none()
            && self.vane_vertical.is_none()
            && self.vane_horizontal.is_none()
    }
}

/// The full-record payload for `POST /Device/SetAta`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetAtaPayload {
    /// Bitmask of the fields the service should apply.
    pub effective_flags: u32,

    /// Target device id.
    #[serde(rename = "DeviceID")]
    pub device_id: u32,

    /// Power state.
    pub power: bool,

    /// Operation mode code.
    pub operation_mode: i32,

    /// Target temperature.
    pub set_temperature: f64,

    /// Fan speed code.
    pub set_fan_speed: u8,

    /// Vertical vane position code.
    pub vane_vertical: i32,

    /// Horizontal vane position code.
    pub vane_horizontal: i32,

    /// Marks the record as a pending command for the unit.
    pub has_pending_command: bool,
}

impl SetAtaPayload {
    /// Field bit for power.
    pub const FLAG_POWER: u32 = 0x01;
    /// Field bit for operation mode.
    pub const FLAG_OPERATION_MODE: u32 = 0x02;
    /// Field bit for target temperature.
    pub const FLAG_TARGET_TEMPERATURE: u32 = 0x04;
    /// Field bit for fan speed.
    pub const FLAG_FAN_SPEED: u32 = 0x08;
    /// Field bit for the vertical vane.
    pub const FLAG_VANE_VERTICAL: u32 = 0x10;
    /// Field bit for the horizontal vane.
    pub const FLAG_VANE_HORIZONTAL: u32 = 0x100;

    /// Encodes a partial update against the device's current state.
    ///
    /// The payload is seeded field-for-field from the decoded state so that
    /// unsupplied fields round-trip unchanged, then each supplied field is
    /// overwritten and its bit ORed into `EffectiveFlags`.
    ///
    /// # Errors
    ///
    /// - [`ValueError::WrongDeviceType`] if the device is not an air
    ///   conditioner.
    /// - [`ValueError::EmptyUpdate`] if no field is supplied.
    pub fn encode(device: &Device, settings: &AtaSettings) -> Result<Self, Error> {
        let status = device
            .as_air_conditioner()
            .filter(|_| device.device_type == DeviceType::AirConditioner)
            .ok_or(ValueError::WrongDeviceType {
                expected: DeviceType::AirConditioner,
                actual: device.device_type,
            })?;

        let mut payload = Self {
            effective_flags: 0,
            device_id: device.id,
            power: status.power,
            operation_mode: status.mode.code(),
            set_temperature: status.target_temperature,
            set_fan_speed: status.fan_speed.code(),
            vane_vertical: status.vane_vertical.code(VaneAxis::Vertical),
            vane_horizontal: status.vane_horizontal.code(VaneAxis::Horizontal),
            has_pending_command: true,
        };

        if let Some(power) = settings.power {
            payload.power = power;
            payload.effective_flags |= Self::FLAG_POWER;
        }
        if let Some(mode) = settings.mode {
            payload.operation_mode = mode.code();
            payload.effective_flags |= Self::FLAG_OPERATION_MODE;
        }
        if let Some(temperature) = settings.target_temperature {
            payload.set_temperature = temperature;
            payload.effective_flags |= Self::FLAG_TARGET_TEMPERATURE;
        }
        if let Some(speed) = settings.fan_speed {
            payload.set_fan_speed = speed.code();
            payload.effective_flags |= Self::FLAG_FAN_SPEED;
        }
        if let Some(position) = settings.vane_vertical {
            payload.vane_vertical = position.code(VaneAxis::Vertical);
            payload.effective_flags |= Self::FLAG_VANE_VERTICAL;
        }
        if let Some(position) = settings.vane_horizontal {
            payload.vane_horizontal = position.code(VaneAxis::Horizontal);
            payload.effective_flags |= Self::FLAG_VANE_HORIZONTAL;
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

    fn ata_device() -> Device {
        let state: DeviceState = serde_json::from_str(
            r#"{
                "DeviceID": 101,
                "DeviceType": 0,
                "Power": false,
                "OperationMode": 1,
                "SetTemperature": 20.0,
                "SetFanSpeed": 3,
                "VaneVertical": 2,
                "VaneHorizontal": 12
            }"#,
        )
        .unwrap();
        Device::from_state(&state, 10)
    }

    #[test]
    fn mask_matches_supplied_fields_exactly() {
        let settings = AtaSettings::new()
            .with_power(true)
            .with_target_temperature(22.5);
        let payload = SetAtaPayload::encode(&ata_device(), &settings).unwrap();

        assert_eq!(
            payload.effective_flags,
            SetAtaPayload::FLAG_POWER | SetAtaPayload::FLAG_TARGET_TEMPERATURE
        );
        assert_eq!(payload.effective_flags.count_ones(), 2);
    }

    #[test]
    fn unsupplied_fields_are_seeded_from_current_state() {
        let settings = AtaSettings::new().with_power(true);
        let payload = SetAtaPayload::encode(&ata_device(), &settings).unwrap();

        assert!(payload.power);
        assert_eq!(payload.operation_mode, 1);
        assert!((payload.set_temperature - 20.0).abs() < f64::EPSILON);
        assert_eq!(payload.set_fan_speed, 3);
        assert_eq!(payload.vane_vertical, 2);
        assert_eq!(payload.vane_horizontal, 12);
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = SetAtaPayload::encode(&ata_device(), &AtaSettings::new()).unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::EmptyUpdate)));
    }

    #[test]
    fn all_fields_set_all_bits() {
        let settings = AtaSettings::new()
            .with_power(true)
            .with_mode(OperationMode::Cold)
            .with_target_temperature(19.0)
            .with_fan_speed(FanSpeed::Auto)
            .with_vane_vertical(VanePosition::Swing)
            .with_vane_horizontal(VanePosition::Swing);
        let payload = SetAtaPayload::encode(&ata_device(), &settings).unwrap();

        assert_eq!(payload.effective_flags, 0x01 | 0x02 | 0x04 | 0x08 | 0x10 | 0x100);
        assert_eq!(payload.operation_mode, 3);
        assert_eq!(payload.set_fan_speed, 0);
        // Swing resolves per axis
        assert_eq!(payload.vane_vertical, 7);
        assert_eq!(payload.vane_horizontal, 12);
    }

    #[test]
    fn encode_rejects_heat_pump_target() {
        let state: DeviceState =
            serde_json::from_str(r#"{"DeviceID": 7, "DeviceType": 1}"#).unwrap();
        let device = Device::from_state(&state, 1);

        let err =
            SetAtaPayload::encode(&device, &AtaSettings::new().with_power(true)).unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::WrongDeviceType { .. })
        ));
    }

    #[test]
    fn encode_rejects_undocumented_type_codes() {
        let state: DeviceState =
            serde_json::from_str(r#"{"DeviceID": 8, "DeviceType": 3}"#).unwrap();
        let device = Device::from_state(&state, 1);

        let err =
            SetAtaPayload::encode(&device, &AtaSettings::new().with_power(true)).unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::WrongDeviceType {
                actual: DeviceType::Other(3),
                ..
            })
        ));
    }

    #[test]
    fn decode_of_encode_preserves_raw_codes() {
        let settings = AtaSettings::new()
            .with_mode(OperationMode::Other(42))
            .with_fan_speed(FanSpeed::Fixed(4))
            .with_vane_vertical(VanePosition::Fixed(5));
        let payload = SetAtaPayload::encode(&ata_device(), &settings).unwrap();

        assert_eq!(OperationMode::from_code(payload.operation_mode).code(), 42);
        assert_eq!(FanSpeed::from_code(payload.set_fan_speed).code(), 4);
        assert_eq!(
            VanePosition::from_code(payload.vane_vertical).code(VaneAxis::Vertical),
            5
        );
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let settings = AtaSettings::new().with_power(true);
        let payload = SetAtaPayload::encode(&ata_device(), &settings).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["EffectiveFlags"], serde_json::json!(1));
        assert_eq!(json["DeviceID"], serde_json::json!(101));
        assert_eq!(json["HasPendingCommand"], serde_json::json!(true));
        assert!(json.get("SetTemperature").is_some());
    }
}
