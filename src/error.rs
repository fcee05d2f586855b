// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the MELCloud client library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: input validation, protocol communication, JSON parsing,
//! and authentication.

use thiserror::Error;

use crate::types::DeviceType;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with the MELCloud service.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during input validation, before any network call.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Login was rejected by the service.
    ///
    /// This is fatal: retrying with the same credentials will not succeed.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The device id is not present in the account's device topology.
    #[error("device {device_id} not found in account")]
    DeviceNotFound {
        /// The device id that could not be resolved.
        device_id: u32,
    },
}

impl Error {
    /// Returns whether this error is worth retrying.
    ///
    /// Transient errors are those where a later attempt can plausibly succeed:
    /// transport failures with no response, timeouts, HTTP 401 (after
    /// re-authentication), HTTP 429, and any 5xx. Everything else propagates
    /// immediately.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Protocol(
                ProtocolError::Http(_)
                    | ProtocolError::Unauthorized
                    | ProtocolError::RateLimited
                    | ProtocolError::Server { .. }
            )
        )
    }
}

/// Errors related to input validation and constraints.
///
/// These are always raised locally, before anything is sent over the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A device update was requested with no fields to apply.
    #[error("update contains no fields to apply")]
    EmptyUpdate,

    /// A report date did not match the strict `YYYY-MM-DD` pattern.
    #[error("invalid report date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// An operation mode string could not be resolved.
    #[error("invalid operation mode: {0}")]
    InvalidMode(String),

    /// A fan speed string could not be resolved.
    #[error("invalid fan speed: {0}")]
    InvalidFanSpeed(String),

    /// A vane position string could not be resolved.
    #[error("invalid vane position: {0}")]
    InvalidVanePosition(String),

    /// A zone number outside {1, 2} was requested.
    #[error("zone must be 1 or 2, got {0}")]
    InvalidZone(u8),

    /// A zone-2 field was supplied for a device without a second zone.
    #[error("device has no second zone")]
    NoSecondZone,

    /// A command was issued against the wrong capability class.
    #[error("expected a {expected} device, got {actual}")]
    WrongDeviceType {
        /// The capability class the command requires.
        expected: DeviceType,
        /// The capability class the target device reported.
        actual: DeviceType,
    },
}

/// Errors related to HTTP communication with the service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The request produced no response: connection failure or timeout.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the session token (HTTP 401).
    #[error("unauthorized (HTTP 401)")]
    Unauthorized,

    /// The service is throttling requests (HTTP 429).
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    /// The service failed internally (HTTP 5xx).
    #[error("server error (HTTP {status})")]
    Server {
        /// The HTTP status code.
        status: u16,
    },

    /// The service rejected the request with a non-retriable status.
    #[error("request rejected (HTTP {status}): {body}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },
}

/// Errors related to parsing service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        assert_eq!(
            ValueError::InvalidZone(3).to_string(),
            "zone must be 1 or 2, got 3"
        );
        assert_eq!(
            ValueError::EmptyUpdate.to_string(),
            "update contains no fields to apply"
        );
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::NoSecondZone.into();
        assert!(matches!(err, Error::Value(ValueError::NoSecondZone)));
        assert!(!err.is_transient());
    }

    #[test]
    fn wrong_device_type_display() {
        let err = ValueError::WrongDeviceType {
            expected: DeviceType::HeatPump,
            actual: DeviceType::AirConditioner,
        };
        assert_eq!(
            err.to_string(),
            "expected a heat pump device, got air conditioner"
        );
    }

    #[test]
    fn transient_classification() {
        assert!(Error::Protocol(ProtocolError::Unauthorized).is_transient());
        assert!(Error::Protocol(ProtocolError::RateLimited).is_transient());
        assert!(Error::Protocol(ProtocolError::Server { status: 503 }).is_transient());
        assert!(
            !Error::Protocol(ProtocolError::Rejected {
                status: 404,
                body: String::new(),
            })
            .is_transient()
        );
        assert!(!Error::AuthenticationFailed("bad password".into()).is_transient());
        assert!(
            !Error::DeviceNotFound { device_id: 7 }.is_transient(),
        );
    }

    #[test]
    fn device_not_found_display() {
        let err = Error::DeviceNotFound { device_id: 42 };
        assert_eq!(err.to_string(), "device 42 not found in account");
    }
}
