// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The MELCloud client and its command/query surface.
//!
//! Every public operation follows the same path: the retry wrapper ensures
//! a session token and executes the remote call (re-authenticating on 401,
//! backing off on transient failures), then the codec reshapes the raw
//! records into the normalized types.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::command::{AtaSettings, AtwSettings, SetAtaPayload, SetAtwPayload};
use crate::device::{Device, DeviceStatus};
use crate::error::{Error, Result, ValueError};
use crate::protocol::{HttpClient, HttpConfig};
use crate::response::{Building, DeviceState, EnergyReport};
use crate::retry::{self, RetryPolicy};
use crate::session::Session;
use crate::types::{DeviceType, ReportDate};

const LIST_DEVICES_PATH: &str = "/User/ListDevices";
const GET_DEVICE_PATH: &str = "/Device/Get";
const SET_ATA_PATH: &str = "/Device/SetAta";
const SET_ATW_PATH: &str = "/Device/SetAtw";
const ENERGY_REPORT_PATH: &str = "/EnergyCost/Report";

/// Request body for `POST /EnergyCost/Report`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EnergyReportRequest {
    #[serde(rename = "DeviceID")]
    device_id: u32,
    from_date: String,
    to_date: String,
    use_currency: bool,
}

/// An authenticated client for the MELCloud service.
///
/// The client holds no device state: every operation is a fresh
/// request/response exchange, and the only shared mutable state is the
/// session token. One instance can be shared freely across tasks.
///
/// # Examples
///
/// ```no_run
/// use melcloud_lib::{AtaSettings, Client};
/// use melcloud_lib::types::OperationMode;
///
/// #[tokio::main]
/// async fn main() -> melcloud_lib::Result<()> {
///     let client = Client::builder("user@example.com", "secret").build()?;
///
///     for device in client.list_devices().await? {
///         println!("{}: {}", device.id, device.name.as_deref().unwrap_or("?"));
///     }
///
///     let settings = AtaSettings::new()
///         .with_power(true)
///         .with_mode(OperationMode::Heat)
///         .with_target_temperature(21.0);
///     client.set_device(1234, &settings, None).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    session: Session,
    retry: RetryPolicy,
    settle_delay: Duration,
}

impl Client {
    /// Default language code sent at login.
    pub const DEFAULT_LANGUAGE: i32 = 0;
    /// Default application version string sent at login.
    pub const DEFAULT_APP_VERSION: &'static str = "1.9.3.0";
    /// Default pause between issuing a command and re-reading device state.
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

    /// Creates a builder with the required credentials.
    #[must_use]
    pub fn builder(email: impl Into<String>, password: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(email, password)
    }

    async fn with_retry<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        retry::run(&self.retry, &self.session, &self.http, op).await
    }

    /// Lists every device in the account.
    ///
    /// The remote topology (buildings, floors, areas) is flattened into one
    /// ordered sequence; each device is stamped with its zero-based position
    /// and owning building id.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] on authentication, transport, or decoding failure.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let buildings: Vec<Building> = self
            .with_retry(|token| async move {
                self.http
                    .get_json(LIST_DEVICES_PATH, &[], Some(&token))
                    .await
            })
            .await?;

        let mut devices = Vec::new();
        for building in &buildings {
            for entry in building.entries() {
                devices.push(Device::from_entry(entry, devices.len()));
            }
        }

        tracing::debug!(count = devices.len(), "listed devices");
        Ok(devices)
    }

    /// Fetches one device's current state.
    ///
    /// When `building_id` is not supplied it is resolved by scanning the
    /// device listing for the id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the id is absent from the
    /// account topology, otherwise [`Error`] on remote failure.
    pub async fn get_device(&self, device_id: u32, building_id: Option<u32>) -> Result<Device> {
        let building_id = self.resolve_building_id(device_id, building_id).await?;
        self.fetch_device(device_id, building_id).await
    }

    /// Applies a partial update to an air-conditioner device.
    ///
    /// The command payload is seeded from the device's current state so
    /// unsupplied fields stay unchanged, then submitted with a bitmask of
    /// exactly the supplied fields. After a short settle delay the device is
    /// re-read and the post-update state returned.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyUpdate`] for an update with no fields
    /// (before any network call), [`ValueError::WrongDeviceType`] if the
    /// target is not an air conditioner, otherwise [`Error`] on remote
    /// failure.
    pub async fn set_device(
        &self,
        device_id: u32,
        settings: &AtaSettings,
        building_id: Option<u32>,
    ) -> Result<Device> {
        if settings.is_empty() {
            return Err(ValueError::EmptyUpdate.into());
        }

        let building_id = self.resolve_building_id(device_id, building_id).await?;
        let current = self.fetch_device(device_id, building_id).await?;
        let payload = SetAtaPayload::encode(&current, settings)?;

        tracing::debug!(device_id, flags = payload.effective_flags, "submitting command");
        self.with_retry(|token| {
            let payload = &payload;
            async move {
                self.http
                    .post_json::<_, serde_json::Value>(SET_ATA_PATH, payload, Some(&token))
                    .await
            }
        })
        .await?;

        tokio::time::sleep(self.settle_delay).await;
        self.fetch_device(device_id, building_id).await
    }

    /// Applies a partial update to a heat-pump device.
    ///
    /// # Errors
    ///
    /// As [`Client::set_device`], plus [`ValueError::NoSecondZone`] when a
    /// zone-2 field targets a single-zone unit. Both class and zone checks
    /// happen before the command is sent.
    pub async fn set_heat_pump_device(
        &self,
        device_id: u32,
        settings: &AtwSettings,
        building_id: Option<u32>,
    ) -> Result<Device> {
        if settings.is_empty() {
            return Err(ValueError::EmptyUpdate.into());
        }

        let building_id = self.resolve_building_id(device_id, building_id).await?;
        let current = self.fetch_device(device_id, building_id).await?;
        let payload = SetAtwPayload::encode(&current, settings)?;

        tracing::debug!(device_id, flags = payload.effective_flags, "submitting command");
        self.with_retry(|token| {
            let payload = &payload;
            async move {
                self.http
                    .post_json::<_, serde_json::Value>(SET_ATW_PATH, payload, Some(&token))
                    .await
            }
        })
        .await?;

        tokio::time::sleep(self.settle_delay).await;
        self.fetch_device(device_id, building_id).await
    }

    /// Fetches an energy report for the inclusive date range
    /// `[from_date, to_date]`.
    ///
    /// Both dates must match the strict `YYYY-MM-DD` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidDate`] for malformed dates (before any
    /// network call), [`Error::DeviceNotFound`] if the id cannot be
    /// resolved, otherwise [`Error`] on remote failure.
    pub async fn get_energy_report(
        &self,
        device_id: u32,
        from_date: &str,
        to_date: &str,
        building_id: Option<u32>,
    ) -> Result<EnergyReport> {
        let from: ReportDate = from_date.parse()?;
        let to: ReportDate = to_date.parse()?;

        self.resolve_building_id(device_id, building_id).await?;

        let request = EnergyReportRequest {
            device_id,
            from_date: from.to_string(),
            to_date: to.to_string(),
            use_currency: false,
        };
        let raw: serde_json::Value = self
            .with_retry(|token| {
                let request = &request;
                async move {
                    self.http
                        .post_json(ENERGY_REPORT_PATH, request, Some(&token))
                        .await
                }
            })
            .await?;

        Ok(EnergyReport::from_raw(
            device_id,
            &request.from_date,
            &request.to_date,
            raw,
        )?)
    }

    // ------------------------------------------------------------------
    // Convenience wrappers
    // ------------------------------------------------------------------

    /// Powers a device on, dispatching on its capability class.
    ///
    /// # Errors
    ///
    /// As [`Client::set_device`] / [`Client::set_heat_pump_device`].
    pub async fn turn_on(&self, device_id: u32, building_id: Option<u32>) -> Result<Device> {
        self.set_power(device_id, true, building_id).await
    }

    /// Powers a device off, dispatching on its capability class.
    ///
    /// # Errors
    ///
    /// As [`Client::set_device`] / [`Client::set_heat_pump_device`].
    pub async fn turn_off(&self, device_id: u32, building_id: Option<u32>) -> Result<Device> {
        self.set_power(device_id, false, building_id).await
    }

    /// Sets an air conditioner's target temperature.
    ///
    /// # Errors
    ///
    /// As [`Client::set_device`].
    pub async fn set_temperature(
        &self,
        device_id: u32,
        temperature: f64,
        building_id: Option<u32>,
    ) -> Result<Device> {
        self.set_device(
            device_id,
            &AtaSettings::new().with_target_temperature(temperature),
            building_id,
        )
        .await
    }

    /// Engages or releases a heat pump's forced hot-water mode.
    ///
    /// # Errors
    ///
    /// As [`Client::set_heat_pump_device`].
    pub async fn set_hot_water_mode(
        &self,
        device_id: u32,
        forced: bool,
        building_id: Option<u32>,
    ) -> Result<Device> {
        self.set_heat_pump_device(
            device_id,
            &AtwSettings::new().with_forced_hot_water(forced),
            building_id,
        )
        .await
    }

    /// Sets a heat pump's tank target temperature.
    ///
    /// # Errors
    ///
    /// As [`Client::set_heat_pump_device`].
    pub async fn set_tank_water_temperature(
        &self,
        device_id: u32,
        temperature: f64,
        building_id: Option<u32>,
    ) -> Result<Device> {
        self.set_heat_pump_device(
            device_id,
            &AtwSettings::new().with_tank_temperature(temperature),
            building_id,
        )
        .await
    }

    /// Sets the target temperature of one heat-pump zone.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidZone`] for zones outside {1, 2}, before
    /// any network call; otherwise as [`Client::set_heat_pump_device`].
    pub async fn set_zone_temperature(
        &self,
        device_id: u32,
        zone: u8,
        temperature: f64,
        building_id: Option<u32>,
    ) -> Result<Device> {
        let settings = match zone {
            1 => AtwSettings::new().with_zone1_temperature(temperature),
            2 => AtwSettings::new().with_zone2_temperature(temperature),
            other => return Err(ValueError::InvalidZone(other).into()),
        };
        self.set_heat_pump_device(device_id, &settings, building_id).await
    }

    /// Fetches one device's live status.
    ///
    /// # Errors
    ///
    /// As [`Client::get_device`].
    pub async fn get_device_status(
        &self,
        device_id: u32,
        building_id: Option<u32>,
    ) -> Result<DeviceStatus> {
        Ok(self.get_device(device_id, building_id).await?.status)
    }

    /// Lists the account's devices of one capability class.
    ///
    /// # Errors
    ///
    /// As [`Client::list_devices`].
    pub async fn get_devices_by_type(&self, device_type: DeviceType) -> Result<Vec<Device>> {
        let mut devices = self.list_devices().await?;
        devices.retain(|device| device.device_type == device_type);
        Ok(devices)
    }

    /// Lists the account's air conditioners.
    ///
    /// # Errors
    ///
    /// As [`Client::list_devices`].
    pub async fn get_air_conditioners(&self) -> Result<Vec<Device>> {
        self.get_devices_by_type(DeviceType::AirConditioner).await
    }

    /// Lists the account's heat pumps.
    ///
    /// # Errors
    ///
    /// As [`Client::list_devices`].
    pub async fn get_heat_pumps(&self) -> Result<Vec<Device>> {
        self.get_devices_by_type(DeviceType::HeatPump).await
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn set_power(
        &self,
        device_id: u32,
        power: bool,
        building_id: Option<u32>,
    ) -> Result<Device> {
        let building_id = self.resolve_building_id(device_id, building_id).await?;
        let current = self.fetch_device(device_id, building_id).await?;

        match current.device_type {
            DeviceType::HeatPump => {
                self.set_heat_pump_device(
                    device_id,
                    &AtwSettings::new().with_power(power),
                    Some(building_id),
                )
                .await
            }
            DeviceType::AirConditioner | DeviceType::Other(_) => {
                self.set_device(
                    device_id,
                    &AtaSettings::new().with_power(power),
                    Some(building_id),
                )
                .await
            }
        }
    }

    async fn resolve_building_id(
        &self,
        device_id: u32,
        building_id: Option<u32>,
    ) -> Result<u32> {
        if let Some(building_id) = building_id {
            return Ok(building_id);
        }

        self.list_devices()
            .await?
            .iter()
            .find(|device| device.id == device_id)
            .map(|device| device.building_id)
            .ok_or(Error::DeviceNotFound { device_id })
    }

    async fn fetch_device(&self, device_id: u32, building_id: u32) -> Result<Device> {
        let state: DeviceState = self
            .with_retry(|token| async move {
                self.http
                    .get_json(
                        GET_DEVICE_PATH,
                        &[
                            ("id", device_id.to_string()),
                            ("buildingID", building_id.to_string()),
                        ],
                        Some(&token),
                    )
                    .await
            })
            .await?;

        Ok(Device::from_state(&state, building_id))
    }
}

/// Builder for [`Client`].
///
/// Credentials are required; everything else has documented defaults.
#[derive(Debug)]
pub struct ClientBuilder {
    email: String,
    password: String,
    language: i32,
    app_version: String,
    http: HttpConfig,
    retry: RetryPolicy,
    settle_delay: Duration,
}

impl ClientBuilder {
    /// Creates a builder with the required credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            language: Client::DEFAULT_LANGUAGE,
            app_version: Client::DEFAULT_APP_VERSION.to_string(),
            http: HttpConfig::new(),
            retry: RetryPolicy::default(),
            settle_delay: Client::DEFAULT_SETTLE_DELAY,
        }
    }

    /// Sets the language code sent at login.
    #[must_use]
    pub fn with_language(mut self, language: i32) -> Self {
        self.language = language;
        self
    }

    /// Sets the application version string sent at login.
    #[must_use]
    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    /// Overrides the service base URL. Useful for tests and staging.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the pause between issuing a command and re-reading state.
    #[must_use]
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Builds the client.
    ///
    /// No network traffic happens here; the first login is performed lazily
    /// by the first operation.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let http = self.http.into_client()?;
        Ok(Client {
            http,
            session: Session::new(self.email, self.password, self.language, self.app_version),
            retry: self.retry,
            settle_delay: self.settle_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = Client::builder("user@example.com", "secret");
        assert_eq!(builder.language, 0);
        assert_eq!(builder.app_version, "1.9.3.0");
        assert_eq!(builder.settle_delay, Duration::from_secs(1));
        assert_eq!(builder.retry.max_attempts, 3);
    }

    #[test]
    fn builder_overrides() {
        let builder = Client::builder("user@example.com", "secret")
            .with_language(4)
            .with_app_version("2.0.0")
            .with_base_url("http://localhost:9000")
            .with_settle_delay(Duration::ZERO)
            .with_retry_policy(RetryPolicy::new().with_max_attempts(1));

        assert_eq!(builder.language, 4);
        assert_eq!(builder.app_version, "2.0.0");
        assert_eq!(builder.settle_delay, Duration::ZERO);
        assert_eq!(builder.retry.max_attempts, 1);

        let client = builder.build().unwrap();
        assert_eq!(client.http.base_url(), "http://localhost:9000");
    }

    #[test]
    fn energy_request_serializes_documented_shape() {
        let request = EnergyReportRequest {
            device_id: 7,
            from_date: "2024-01-01".to_string(),
            to_date: "2024-01-31".to_string(),
            use_currency: false,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["DeviceID"], serde_json::json!(7));
        assert_eq!(json["FromDate"], serde_json::json!("2024-01-01"));
        assert_eq!(json["ToDate"], serde_json::json!("2024-01-31"));
        assert_eq!(json["UseCurrency"], serde_json::json!(false));
    }
}
