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

use bytes::Bytes;
use log::{debug, warn};
use mwsign_core::{Context, Error, ErrorKind, RemoteResponse, Result};

use crate::constants::*;
use crate::decode::parse_error_envelope;
use crate::Settings;

/// Classification of a single attempt.
#[derive(Debug)]
pub enum Outcome {
    /// 2xx response without an error envelope.
    Success(http::Response<Bytes>),
    /// Transient failure, the request may be sent again.
    Retry(Error),
    /// Failure that ends the call.
    Fatal(Error),
}

/// Classify the result of one transport call.
///
/// This function is pure: it neither sleeps nor logs.
pub fn classify(result: Result<http::Response<Bytes>>) -> Outcome {
    let resp = match result {
        Ok(resp) => resp,
        Err(err) => {
            return match err.kind() {
                ErrorKind::Timeout => Outcome::Retry(err),
                ErrorKind::Transport => Outcome::Fatal(err),
                _ => Outcome::Fatal(Error::transport("failed to send request").with_source(err)),
            }
        }
    };

    let status = resp.status();
    let envelope = parse_error_envelope(resp.body());
    if status.is_success() && envelope.is_none() {
        return Outcome::Success(resp);
    }

    let Some(mut remote) = envelope else {
        let err = Error::new(
            ErrorKind::UndefinedRemote,
            format!(
                "unexpected status {status} with body: {}",
                String::from_utf8_lossy(&resp.body()[..resp.body().len().min(256)])
            ),
        )
        .with_response(RemoteResponse {
            status: status.as_u16(),
            ..Default::default()
        });
        return Outcome::Fatal(err);
    };
    remote.status = status.as_u16();

    let kind = match (remote.status, remote.code.as_deref().unwrap_or_default()) {
        (503, QUOTA_EXCEEDED) => ErrorKind::QuotaExceeded,
        (503, REQUEST_THROTTLED) => ErrorKind::Throttled,
        (400, INPUT_STREAM_DISCONNECTED) => ErrorKind::InputStreamDisconnected,
        (400, INVALID_PARAMETER_VALUE) => ErrorKind::InvalidParameterValue,
        (401, ACCESS_DENIED) => ErrorKind::AccessDenied,
        (403, INVALID_ACCESS_KEY_ID) => ErrorKind::InvalidAccessKeyId,
        (403, SIGNATURE_DOES_NOT_MATCH) => ErrorKind::SignatureDoesNotMatch,
        (404, INVALID_ADDRESS) => ErrorKind::InvalidAddress,
        (500, INTERNAL_ERROR) => ErrorKind::InternalError,
        _ => ErrorKind::UndefinedRemote,
    };
    let message = remote
        .message
        .clone()
        .unwrap_or_else(|| "remote returned an error".to_string());
    let err = Error::new(kind, message).with_response(remote);

    if err.is_retryable() {
        Outcome::Retry(err)
    } else {
        Outcome::Fatal(err)
    }
}

/// RetryPolicy runs a request until it succeeds, fails fatally, or runs out
/// of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    throttle_backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy with `max_retries + 1` attempts.
    pub fn new(max_retries: u32, throttle_backoff: Duration) -> Self {
        Self {
            max_retries,
            throttle_backoff,
        }
    }

    /// Total number of attempts.
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait to apply before retrying after `err`.
    pub fn backoff(&self, err: &Error) -> Option<Duration> {
        match err.kind() {
            ErrorKind::QuotaExceeded => Some(QUOTA_BACKOFF),
            ErrorKind::Throttled => Some(self.throttle_backoff),
            _ => None,
        }
    }

    /// Send the requests produced by `build` until one succeeds.
    ///
    /// `build` receives the 0-based attempt number. Exhausting the attempts
    /// returns `RetriesExhausted` with the last transient error as its source.
    pub async fn execute<F>(&self, ctx: &Context, mut build: F) -> Result<http::Response<Bytes>>
    where
        F: FnMut(u32) -> Result<http::Request<Bytes>>,
    {
        let attempts = self.attempts();
        let mut last = None;

        for attempt in 0..attempts {
            let req = build(attempt)?;
            debug!(
                "sending attempt {}/{attempts}: {} {}",
                attempt + 1,
                req.method(),
                req.uri()
            );

            let err = match classify(ctx.http_send(req).await) {
                Outcome::Success(resp) => return Ok(resp),
                Outcome::Fatal(err) => return Err(err),
                Outcome::Retry(err) => err,
            };

            if attempt + 1 < attempts {
                match self.backoff(&err) {
                    Some(dur) => {
                        warn!("attempt {} failed: {err}, retrying in {dur:?}", attempt + 1);
                        ctx.sleep(dur).await?;
                    }
                    None => warn!("attempt {} failed: {err}, retrying", attempt + 1),
                }
            }
            last = Some(err);
        }

        let last = last.ok_or_else(|| Error::unexpected("no attempt was made"))?;
        let mut err = Error::retries_exhausted(format!("giving up after {attempts} attempts"));
        if let Some(resp) = last.response() {
            err = err.with_response(resp.clone());
        }
        Err(err.with_source(last))
    }
}

impl From<&Settings> for RetryPolicy {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.max_retries, settings.throttle_backoff())
    }
}
