// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;

use serde::Deserialize;

/// Shape of the value returned by [`crate::Client::create_request`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Return the response body untouched.
    Raw,
    /// Decode the response body into a tree.
    #[default]
    Structured,
}

/// Client behaviour settings.
///
/// Every field has a default, so settings can be deserialized from a partial
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shape of the returned value.
    pub response_format: ResponseFormat,
    /// Extra attempts after the first one for retryable failures.
    pub max_retries: u32,
    /// Per-attempt transport timeout.
    pub timeout_seconds: u64,
    /// Wait applied after a `RequestThrottled` response.
    pub throttle_backoff_seconds: u64,
    /// Re-sign every attempt with a fresh `Timestamp`.
    ///
    /// When disabled, the parameters signed for the first attempt are replayed.
    pub refresh_signature_on_retry: bool,
    /// `User-Agent` sent unless the caller provides one.
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            response_format: ResponseFormat::Structured,
            max_retries: 3,
            timeout_seconds: 60,
            throttle_backoff_seconds: 10,
            refresh_signature_on_retry: true,
            user_agent: format!("mwsign/{} (Language=Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Set the response format.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-attempt timeout in seconds.
    pub fn with_timeout_seconds(mut self, secs: u64) -> Self {
        self.timeout_seconds = secs;
        self
    }

    /// Set the throttling backoff in seconds.
    pub fn with_throttle_backoff_seconds(mut self, secs: u64) -> Self {
        self.throttle_backoff_seconds = secs;
        self
    }

    /// Toggle re-signing on retry.
    pub fn with_refresh_signature_on_retry(mut self, refresh: bool) -> Self {
        self.refresh_signature_on_retry = refresh;
        self
    }

    /// Set the default `User-Agent`.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(crate) fn throttle_backoff(&self) -> Duration {
        Duration::from_secs(self.throttle_backoff_seconds)
    }
}
