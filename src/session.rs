// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session token lifecycle.
//!
//! The token is absent at construction, populated by the first successful
//! login, and cleared again when the service rejects it. Concurrent callers
//! may race to log in; the redundant login is idempotent and deliberately
//! left unserialized.

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::protocol::HttpClient;
use crate::response::LoginResponse;

const LOGIN_PATH: &str = "/Login/ClientLogin2";

/// Request body for `POST /Login/ClientLogin2`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    language: i32,
    app_version: &'a str,
    persist: bool,
    captcha_response: Option<()>,
}

/// Holds the credentials and the process-lifetime session token.
#[derive(Debug)]
pub(crate) struct Session {
    email: String,
    password: String,
    language: i32,
    app_version: String,
    token: Mutex<Option<String>>,
}

impl Session {
    pub(crate) fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        language: i32,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            language,
            app_version: app_version.into(),
            token: Mutex::new(None),
        }
    }

    /// Returns the held token, logging in first only when none is held.
    pub(crate) async fn ensure(&self, http: &HttpClient) -> Result<String> {
        if let Some(token) = self.token.lock().clone() {
            return Ok(token);
        }

        let token = self.login(http).await?;
        *self.token.lock() = Some(token.clone());
        Ok(token)
    }

    /// Clears the held token so the next call re-authenticates.
    pub(crate) fn invalidate(&self) {
        *self.token.lock() = None;
        tracing::debug!("session token invalidated");
    }

    async fn login(&self, http: &HttpClient) -> Result<String> {
        tracing::debug!(email = %self.email, "logging in");

        let request = LoginRequest {
            email: &self.email,
            password: &self.password,
            language: self.language,
            app_version: &self.app_version,
            persist: false,
            captcha_response: None,
        };

        let response: LoginResponse = http.post_json(LOGIN_PATH, &request, None).await?;
        match response.context_key() {
            Some(token) => Ok(token.to_string()),
            None => Err(Error::AuthenticationFailed(
                response
                    .error_message
                    .unwrap_or_else(|| "login rejected by service".to_string()),
            )),
        }
    }
}
