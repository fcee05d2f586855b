// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client implementation.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::CONTEXT_KEY_HEADER;
use crate::error::{Error, ParseError, ProtocolError};

/// Configuration for the HTTP transport.
///
/// # Examples
///
/// ```
/// use melcloud_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new()
///     .with_base_url("https://app.melcloud.com/Mitsubishi.Wifi.Client")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    timeout: Duration,
}

impl HttpConfig {
    /// The production service endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://app.melcloud.com/Mitsubishi.Wifi.Client";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration pointing at the production endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the base URL. Useful for tests and staging endpoints.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the MELCloud service.
///
/// Thin wrapper over `reqwest` that joins paths onto the base endpoint,
/// attaches the session token header, and maps HTTP status codes onto
/// [`ProtocolError`] variants. Response bodies are decoded from JSON here so
/// callers deal in typed records only.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issues an authenticated GET and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] for transport and HTTP-status failures,
    /// [`ParseError`] for undecodable bodies.
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<R, Error> {
        let mut request = self.client.get(self.url(path)).query(query);
        if let Some(token) = token {
            request = request.header(CONTEXT_KEY_HEADER, token);
        }
        self.execute(path, request).await
    }

    /// Issues a POST with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] for transport and HTTP-status failures,
    /// [`ParseError`] for undecodable bodies.
    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<R, Error> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.header(CONTEXT_KEY_HEADER, token);
        }
        self.execute(path, request).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<R, Error> {
        tracing::debug!(path, "sending request");

        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::Unauthorized.into());
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProtocolError::RateLimited.into());
        }
        if status.is_server_error() {
            return Err(ProtocolError::Server {
                status: status.as_u16(),
            }
            .into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProtocolError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        tracing::debug!(path, bytes = body.len(), "received response");

        serde_json::from_str(&body).map_err(|err| ParseError::Json(err).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HttpConfig::new();
        assert_eq!(config.base_url(), HttpConfig::DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn url_joins_path_onto_base() {
        let client = HttpConfig::new()
            .with_base_url("http://127.0.0.1:9000/")
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(
            client.url("/User/ListDevices"),
            "http://127.0.0.1:9000/User/ListDevices"
        );
    }

    #[test]
    fn config_builder_chain() {
        let config = HttpConfig::new()
            .with_base_url("http://localhost:1234")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url(), "http://localhost:1234");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
