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

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method};
use mwsign_core::{RequestTimeout, Result};

use crate::constants::FORM_CONTENT_TYPE;
use crate::{Endpoint, Settings, SignedParams};

/// Assemble the outbound request for one attempt.
///
/// `GET` requests carry the signed parameters in the query string, every
/// other method sends them as a form body.
pub fn build_request(
    signed: &SignedParams,
    endpoint: &Endpoint,
    host: &str,
    headers: &HeaderMap,
    settings: &Settings,
) -> Result<http::Request<Bytes>> {
    let encoded = signed.encoded();

    let (uri, body) = if endpoint.method == Method::GET {
        (
            format!("https://{host}{}?{encoded}", endpoint.path()),
            Bytes::new(),
        )
    } else {
        (
            format!("https://{host}{}", endpoint.path()),
            Bytes::from(encoded),
        )
    };

    let mut req = http::Request::builder()
        .method(endpoint.method.clone())
        .uri(uri)
        .body(body)?;

    let req_headers = req.headers_mut();
    req_headers.extend(headers.clone());
    req_headers.insert(HOST, HeaderValue::from_str(host)?);
    if endpoint.method == Method::POST {
        req_headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    }
    if !req_headers.contains_key(USER_AGENT) {
        req_headers.insert(USER_AGENT, HeaderValue::from_str(&settings.user_agent)?);
    }

    req.extensions_mut()
        .insert(RequestTimeout(settings.timeout()));

    Ok(req)
}
