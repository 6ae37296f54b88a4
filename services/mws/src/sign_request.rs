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

use std::collections::BTreeMap;
use std::fmt::Write;

use log::debug;
use mwsign_core::hash::base64_hmac_sha256;
use mwsign_core::time::{now, DateTime};
use mwsign_core::{Error, Result};

use crate::constants::*;
use crate::{Credential, Endpoint, ParamValue, Params, Seller};

/// Parameters after signing, sorted by key with `Signature` appended last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    params: Vec<(String, String)>,
    signature: String,
    canonical_string: String,
}

impl SignedParams {
    /// Signed parameters in wire order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Base64 signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The string the signature was computed over.
    pub fn canonical_string(&self) -> &str {
        &self.canonical_string
    }

    /// Form-encode all parameters, `Signature` included.
    pub fn encoded(&self) -> String {
        encode(&self.params)
    }
}

/// RequestSigner computes `SignatureVersion=2` signatures with `HmacSHA256`.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign `params` for `endpoint` on `host`.
    ///
    /// Caller parameters override the base ones. `Null` values are dropped
    /// and any remaining `List` value is rejected with `RequestInvalid`.
    pub fn sign(
        &self,
        endpoint: &Endpoint,
        host: &str,
        params: &Params,
        cred: &Credential,
        seller: &Seller,
    ) -> Result<SignedParams> {
        let now = self.time.unwrap_or_else(now);

        let mut merged: BTreeMap<&str, ParamValue> = BTreeMap::new();
        merged.insert(ACTION, ParamValue::from(&*endpoint.action));
        merged.insert(AWS_ACCESS_KEY_ID, cred.access_key_id().into());
        if let Some(token) = seller.auth_token() {
            merged.insert(MWS_AUTH_TOKEN, token.into());
        }
        merged.insert(TIMESTAMP, now.into());
        merged.insert(VERSION, ParamValue::from(&*endpoint.api_version));
        for (k, v) in params {
            merged.insert(k.as_str(), v.clone());
        }
        merged.insert(SIGNATURE_METHOD, HMAC_SHA256.into());
        merged.insert(SIGNATURE_VERSION, SIGNATURE_VERSION_2.into());
        if endpoint.merchant_discriminated {
            merged.insert(MERCHANT, seller.id().into());
        } else {
            merged.insert(SELLER_ID, seller.id().into());
        }

        let mut sorted = Vec::with_capacity(merged.len() + 1);
        for (k, v) in merged {
            match v {
                ParamValue::Null => continue,
                ParamValue::List(_) => {
                    return Err(Error::request_invalid(format!(
                        "parameter {k} is an array and must be normalized before signing"
                    ))
                    .with_context(format!("action: {}", endpoint.action)));
                }
                v => {
                    if let Some(s) = v.to_scalar_string() {
                        sorted.push((k.to_string(), s));
                    }
                }
            }
        }

        let canonical_string = canonical_string(endpoint, host, &sorted)?;
        debug!("calculated canonical string: {canonical_string}");

        let signature =
            base64_hmac_sha256(cred.secret_access_key().as_bytes(), canonical_string.as_bytes());
        sorted.push((SIGNATURE.to_string(), signature.clone()));

        Ok(SignedParams {
            params: sorted,
            signature,
            canonical_string,
        })
    }
}

/// Build `METHOD\nhost\n/{path}/{version}\n{query}` from sorted parameters.
fn canonical_string(
    endpoint: &Endpoint,
    host: &str,
    sorted: &[(String, String)],
) -> Result<String> {
    let query = encode(sorted);
    let path = endpoint.path();

    let mut f = String::with_capacity(query.len() + host.len() + path.len() + 16);
    writeln!(f, "{}", endpoint.method)?;
    writeln!(f, "{host}")?;
    writeln!(f, "{path}")?;
    write!(f, "{query}")?;

    Ok(f)
}

fn encode(params: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}
