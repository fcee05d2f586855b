// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy report parsing.

use serde::Deserialize;

use crate::error::ParseError;

/// The modelled subset of `POST /EnergyCost/Report`.
///
/// The service returns many more fields than the client models; the caller
/// keeps access to those through [`EnergyReport::raw`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEnergyReport {
    /// Total runtime over the report range, in minutes.
    #[serde(default)]
    pub total_minutes: f64,

    /// Heating-mode consumption, kWh.
    #[serde(default)]
    pub total_heating_consumed: f64,

    /// Cooling-mode consumption, kWh.
    #[serde(default)]
    pub total_cooling_consumed: f64,

    /// Auto-mode consumption, kWh.
    #[serde(default)]
    pub total_auto_consumed: f64,

    /// Dry-mode consumption, kWh.
    #[serde(default)]
    pub total_dry_consumed: f64,

    /// Fan-mode consumption, kWh.
    #[serde(default)]
    pub total_fan_consumed: f64,

    /// Consumption not attributed to a mode, kWh.
    #[serde(default)]
    pub total_other_consumed: f64,

    /// Hot-water subsystem consumption, kWh.
    #[serde(default)]
    pub total_hot_water_consumed: f64,

    /// Heating subsystem production, kWh.
    #[serde(default)]
    pub total_heating_produced: f64,

    /// Cooling subsystem production, kWh.
    #[serde(default)]
    pub total_cooling_produced: f64,

    /// Hot-water subsystem production, kWh.
    #[serde(default)]
    pub total_hot_water_produced: f64,
}

/// A normalized energy report for one device over an inclusive date range.
#[derive(Debug, Clone)]
pub struct EnergyReport {
    /// The device the report covers.
    pub device_id: u32,

    /// Inclusive range start, `YYYY-MM-DD`.
    pub from_date: String,

    /// Inclusive range end, `YYYY-MM-DD`.
    pub to_date: String,

    /// Total runtime over the range, in minutes.
    pub total_minutes: f64,

    /// Consumption split by operation mode and subsystem.
    pub consumed: ConsumedEnergy,

    /// Production split by subsystem.
    pub produced: ProducedEnergy,

    /// The untouched remote response, for fields not yet modelled.
    pub raw: serde_json::Value,
}

impl EnergyReport {
    /// Builds a normalized report from the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the body does not match the expected record
    /// shape.
    pub fn from_raw(
        device_id: u32,
        from_date: &str,
        to_date: &str,
        raw: serde_json::Value,
    ) -> Result<Self, ParseError> {
        let parsed: RawEnergyReport = serde_json::from_value(raw.clone())?;
        Ok(Self {
            device_id,
            from_date: from_date.to_string(),
            to_date: to_date.to_string(),
            total_minutes: parsed.total_minutes,
            consumed: ConsumedEnergy {
                heating: parsed.total_heating_consumed,
                cooling: parsed.total_cooling_consumed,
                auto: parsed.total_auto_consumed,
                dry: parsed.total_dry_consumed,
                fan: parsed.total_fan_consumed,
                other: parsed.total_other_consumed,
                hot_water: parsed.total_hot_water_consumed,
            },
            produced: ProducedEnergy {
                heating: parsed.total_heating_produced,
                cooling: parsed.total_cooling_produced,
                hot_water: parsed.total_hot_water_produced,
            },
            raw,
        })
    }

    /// Returns the total consumption across all modes and subsystems, kWh.
    #[must_use]
    pub fn total_consumed(&self) -> f64 {
        let c = &self.consumed;
        c.heating + c.cooling + c.auto + c.dry + c.fan + c.other + c.hot_water
    }

    /// Returns the total production across all subsystems, kWh.
    #[must_use]
    pub fn total_produced(&self) -> f64 {
        let p = &self.produced;
        p.heating + p.cooling + p.hot_water
    }
}

/// Consumption figures split by operation mode and subsystem, kWh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConsumedEnergy {
    /// Heating mode.
    pub heating: f64,
    /// Cooling mode.
    pub cooling: f64,
    /// Auto mode.
    pub auto: f64,
    /// Dry mode.
    pub dry: f64,
    /// Fan mode.
    pub fan: f64,
    /// Unattributed.
    pub other: f64,
    /// Hot-water subsystem.
    pub hot_water: f64,
}

/// Production figures split by subsystem, kWh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProducedEnergy {
    /// Heating subsystem.
    pub heating: f64,
    /// Cooling subsystem.
    pub cooling: f64,
    /// Hot-water subsystem.
    pub hot_water: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_totals_and_keeps_raw() {
        let raw = serde_json::json!({
            "TotalMinutes": 1440.0,
            "TotalHeatingConsumed": 12.5,
            "TotalCoolingConsumed": 3.5,
            "TotalHotWaterConsumed": 4.0,
            "TotalHeatingProduced": 40.0,
            "TotalHotWaterProduced": 10.0,
            "CO2Generated": 1.9
        });
        let report = EnergyReport::from_raw(7, "2024-01-01", "2024-01-31", raw).unwrap();

        assert_eq!(report.device_id, 7);
        assert!((report.total_minutes - 1440.0).abs() < f64::EPSILON);
        assert!((report.consumed.heating - 12.5).abs() < f64::EPSILON);
        assert!((report.total_consumed() - 20.0).abs() < f64::EPSILON);
        assert!((report.total_produced() - 50.0).abs() < f64::EPSILON);
        // Unmodelled fields stay reachable through the raw value
        assert_eq!(report.raw["CO2Generated"], serde_json::json!(1.9));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let report =
            EnergyReport::from_raw(1, "2024-01-01", "2024-01-02", serde_json::json!({})).unwrap();
        assert!(report.total_consumed().abs() < f64::EPSILON);
        assert!(report.total_produced().abs() < f64::EPSILON);
    }

    #[test]
    fn non_record_body_is_a_parse_error() {
        let err =
            EnergyReport::from_raw(1, "2024-01-01", "2024-01-02", serde_json::json!([1, 2]))
                .unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
