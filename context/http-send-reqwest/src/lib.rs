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

//! Reqwest-based HTTP sending implementation for mwsign.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `mwsign_core` on top of
//! a `reqwest::Client`. The client owns connection pooling; this crate only
//! converts requests and maps failures into mwsign error kinds.
//!
//! ## Example
//!
//! ```no_run
//! use mwsign_core::Context;
//! use mwsign_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn example() -> Result<(), reqwest::Error> {
//! let client = reqwest::Client::builder()
//!     .pool_max_idle_per_host(10)
//!     .build()?;
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use mwsign_core::{Error, HttpSend, RequestTimeout, Result};
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
///
/// A [`RequestTimeout`] extension on the incoming request is applied as the
/// reqwest per-request timeout.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = req.extensions().get::<RequestTimeout>().copied();

        let mut req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        if let Some(RequestTimeout(dur)) = timeout {
            *req.timeout_mut() = Some(dur);
        }

        debug!("sending {} {}", req.method(), req.url());
        let resp: http::Response<_> = self.client.execute(req).await.map_err(map_err)?.into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(map_err)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn map_err(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout("request timed out").with_source(err)
    } else {
        Error::transport("failed to send request").with_source(err)
    }
}
