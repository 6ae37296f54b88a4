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

use std::error::Error as _;
use std::time::Duration;

use anyhow::Result;
use mwsign_core::{Context, Error, ErrorKind};
use mwsign_mws::endpoint::orders;
use mwsign_mws::{ArrayPrefixes, Client, Params, RequestOptions, Settings};
use pretty_assertions::assert_eq;

use crate::mock::*;

const STATUS_OK: &str = "<GetServiceStatusResponse><GetServiceStatusResult><Status>GREEN</Status></GetServiceStatusResult></GetServiceStatusResponse>";

fn options(client: &Client) -> RequestOptions {
    client.create_options(&orders::GET_SERVICE_STATUS, &Params::new(), &ArrayPrefixes::new())
}

fn source_kind(err: &Error) -> Option<ErrorKind> {
    err.source()
        .and_then(|e| e.downcast_ref::<Error>())
        .map(|e| e.kind())
}

#[tokio::test]
async fn test_timeouts_then_success() -> Result<()> {
    let (client, http, sleep) = scripted_client(
        [Step::Timeout, Step::Timeout, Step::ok(STATUS_OK)],
        Settings::default().with_max_retries(2),
    );

    client.create_request(&options(&client)).await?;

    assert_eq!(http.count(), 3);
    assert!(sleep.slept().is_empty(), "timeouts retry without sleeping");
    Ok(())
}

#[tokio::test]
async fn test_timeouts_exhaust_retries() {
    let (client, http, sleep) = scripted_client(
        [Step::Timeout, Step::Timeout, Step::ok(STATUS_OK)],
        Settings::default().with_max_retries(1),
    );

    let err = client.create_request(&options(&client)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RetriesExhausted);
    assert_eq!(source_kind(&err), Some(ErrorKind::Timeout));
    assert_eq!(http.count(), 2);
    assert!(sleep.slept().is_empty());
}

#[tokio::test]
async fn test_throttled_sleeps_configured_backoff() -> Result<()> {
    let (client, http, sleep) = scripted_client(
        [Step::error(503, "RequestThrottled"), Step::ok(STATUS_OK)],
        Settings::default().with_throttle_backoff_seconds(7),
    );

    client.create_request(&options(&client)).await?;

    assert_eq!(http.count(), 2);
    assert_eq!(sleep.slept(), vec![Duration::from_secs(7)]);
    Ok(())
}

#[tokio::test]
async fn test_quota_exceeded_sleeps_an_hour() -> Result<()> {
    let (client, http, sleep) = scripted_client(
        [Step::error(503, "QuotaExceeded"), Step::ok(STATUS_OK)],
        Settings::default(),
    );

    client.create_request(&options(&client)).await?;

    assert_eq!(http.count(), 2);
    assert_eq!(sleep.slept(), vec![Duration::from_secs(3600)]);
    Ok(())
}

#[tokio::test]
async fn test_no_sleep_after_final_attempt() {
    let (client, http, sleep) = scripted_client(
        [Step::error(503, "RequestThrottled")],
        Settings::default().with_max_retries(2),
    );

    let err = client.create_request(&options(&client)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RetriesExhausted);
    assert_eq!(source_kind(&err), Some(ErrorKind::Throttled));
    assert_eq!(
        err.response().and_then(|r| r.code.as_deref()),
        Some("RequestThrottled")
    );
    assert_eq!(http.count(), 3);
    assert_eq!(sleep.slept().len(), 2);
}

#[tokio::test]
async fn test_fatal_errors_short_circuit() {
    for (status, code, kind) in [
        (400, "InputStreamDisconnected", ErrorKind::InputStreamDisconnected),
        (400, "InvalidParameterValue", ErrorKind::InvalidParameterValue),
        (401, "AccessDenied", ErrorKind::AccessDenied),
        (403, "InvalidAccessKeyId", ErrorKind::InvalidAccessKeyId),
        (403, "SignatureDoesNotMatch", ErrorKind::SignatureDoesNotMatch),
        (404, "InvalidAddress", ErrorKind::InvalidAddress),
        (500, "InternalError", ErrorKind::InternalError),
        (503, "ServiceUnavailable", ErrorKind::UndefinedRemote),
    ] {
        let (client, http, sleep) = scripted_client(
            [Step::error(status, code), Step::ok(STATUS_OK)],
            Settings::default(),
        );

        let err = client.create_request(&options(&client)).await.unwrap_err();

        assert_eq!(err.kind(), kind, "status {status} code {code}");
        assert_eq!(err.response().map(|r| r.status), Some(status));
        assert_eq!(http.count(), 1, "{code} must not be retried");
        assert!(sleep.slept().is_empty());
    }
}

#[tokio::test]
async fn test_transport_failure_is_fatal() {
    let (client, http, _) =
        scripted_client([Step::Refused, Step::ok(STATUS_OK)], Settings::default());

    let err = client.create_request(&options(&client)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(http.count(), 1);
}

#[tokio::test]
async fn test_missing_sleeper_surfaces_error() {
    let http = ScriptedHttpSend::new([Step::error(503, "RequestThrottled"), Step::ok(STATUS_OK)]);
    let ctx = Context::new().with_http_send(http.clone());
    let client = Client::new(ctx, credential(), seller(), Settings::default());

    let err = client.create_request(&options(&client)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_eq!(http.count(), 1);
}

async fn run_with_refresh(refresh: bool) -> Result<Vec<Recorded>> {
    let http = ScriptedHttpSend::new([Step::error(503, "RequestThrottled"), Step::ok(STATUS_OK)]);
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_sleep(RecordingSleep::with_delay(Duration::from_millis(5)));
    let client = Client::new(
        ctx,
        credential(),
        seller(),
        Settings::default()
            .with_throttle_backoff_seconds(0)
            .with_refresh_signature_on_retry(refresh),
    );

    client.create_request(&options(&client)).await?;
    Ok(http.requests())
}

#[tokio::test]
async fn test_refresh_signature_on_retry() -> Result<()> {
    let reqs = run_with_refresh(true).await?;
    assert_eq!(reqs.len(), 2);
    assert_ne!(reqs[0].param("Timestamp"), reqs[1].param("Timestamp"));
    assert_ne!(reqs[0].param("Signature"), reqs[1].param("Signature"));
    Ok(())
}

#[tokio::test]
async fn test_replay_signature_on_retry() -> Result<()> {
    let reqs = run_with_refresh(false).await?;
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].body, reqs[1].body);
    Ok(())
}
