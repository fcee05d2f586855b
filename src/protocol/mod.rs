// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the MELCloud service.
//!
//! The service speaks JSON over HTTPS against one fixed base endpoint.
//! [`HttpClient`] owns the connection pool and translates HTTP status codes
//! into the error taxonomy; everything above it (session, retry, command
//! surface) is transport-agnostic.

mod http;

pub use http::{HttpClient, HttpConfig};

/// Header carrying the session token on authenticated requests.
pub const CONTEXT_KEY_HEADER: &str = "X-MitsContextKey";
