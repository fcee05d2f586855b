// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use serde::Deserialize;

/// Response from `POST /Login/ClientLogin2`.
///
/// A non-null `ErrorId` means the credentials were rejected; on success the
/// session token is nested under `LoginData.ContextKey`.
///
/// # Examples
///
/// ```
/// use melcloud_lib::response::LoginResponse;
///
/// let json = r#"{
///     "ErrorId": null,
///     "LoginData": {"ContextKey": "ABC123"}
/// }"#;
/// let response: LoginResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.context_key(), Some("ABC123"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    /// Error identifier; `None` on success.
    #[serde(default)]
    pub error_id: Option<i64>,

    /// Human-readable rejection reason, when present.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Session data; present only on success.
    #[serde(default)]
    pub login_data: Option<LoginData>,
}

impl LoginResponse {
    /// Returns the session token if the login succeeded.
    #[must_use]
    pub fn context_key(&self) -> Option<&str> {
        if self.error_id.is_some() {
            return None;
        }
        self.login_data.as_ref().map(|d| d.context_key.as_str())
    }
}

/// Session data nested in a successful login response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginData {
    /// The opaque session token carried on subsequent authenticated calls.
    pub context_key: String,
}
