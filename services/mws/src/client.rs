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

use std::sync::{Arc, PoisonError, RwLock};

use http::HeaderMap;
use log::debug;
use mwsign_core::{Context, Error, ProvideCredential, Result};
use serde_json::Value;

use crate::build::build_request;
use crate::decode::decode;
use crate::params::normalize;
use crate::{
    ArrayPrefixes, Config, Credential, Endpoint, Params, Region, RequestSigner, ResponseFormat,
    RetryPolicy, Seller, Settings,
};

/// Everything needed to send one call, built by [`Client::create_options`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Operation to call.
    pub endpoint: Endpoint,
    /// Normalized parameters.
    pub params: Params,
    /// Extra headers sent with every attempt.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Add extra headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Value returned by [`Client::create_request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Undecoded response body.
    Raw(String),
    /// Decoded `{action}Result` subtree.
    Structured(Value),
}

#[derive(Debug)]
struct Snapshot {
    credential: Credential,
    seller: Seller,
}

/// Client sends signed requests on behalf of one seller.
///
/// Clones share their configuration: [`Client::configure_area`] and
/// [`Client::configure_seller`] on one clone are seen by all of them. Every
/// call works on the configuration it found when it started.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    settings: Settings,
    signer: RequestSigner,
    state: Arc<RwLock<Arc<Snapshot>>>,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, credential: Credential, seller: Seller, settings: Settings) -> Self {
        Self {
            ctx,
            settings,
            signer: RequestSigner::new(),
            state: Arc::new(RwLock::new(Arc::new(Snapshot { credential, seller }))),
        }
    }

    /// Create a new client with the credential loaded by `provider`.
    pub async fn from_provider<P>(
        ctx: Context,
        provider: &P,
        seller: Seller,
        settings: Settings,
    ) -> Result<Self>
    where
        P: ProvideCredential<Credential = Credential>,
    {
        let credential = provider
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::config_invalid("no credential found"))?;

        Ok(Self::new(ctx, credential, seller, settings))
    }

    /// Create a new client from `config`, filling unset fields from the environment.
    pub fn from_config(ctx: Context, config: Config, settings: Settings) -> Result<Self> {
        let (credential, seller) = config.from_env(&ctx).build()?;

        Ok(Self::new(ctx, credential, seller, settings))
    }

    /// Replace the signer, mostly used to pin the signing time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Settings of this client.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, f: impl FnOnce(&Snapshot) -> Snapshot) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = Arc::new(f(&state));
    }

    /// Current seller.
    pub fn seller(&self) -> Seller {
        self.snapshot().seller.clone()
    }

    /// Current region.
    pub fn region(&self) -> Region {
        self.snapshot().seller.region()
    }

    /// Marketplace id of the current region.
    pub fn marketplace_id(&self) -> &'static str {
        self.region().descriptor().merchant_id
    }

    /// Move the current seller to the region named by `code`.
    ///
    /// Returns `ConfigInvalid` for an unknown code and keeps the current region.
    pub fn configure_area(&self, code: &str) -> Result<()> {
        let region: Region = code.parse()?;
        self.replace(|s| Snapshot {
            credential: s.credential.clone(),
            seller: s.seller.with_region(region),
        });
        debug!("client moved to region {region}");
        Ok(())
    }

    /// Replace the seller wholesale.
    pub fn configure_seller(&self, seller: Seller) {
        self.replace(|s| Snapshot {
            credential: s.credential.clone(),
            seller,
        });
    }

    /// Normalize `params` for `endpoint`.
    ///
    /// `params` is not modified.
    pub fn create_options(
        &self,
        endpoint: &Endpoint,
        params: &Params,
        prefixes: &ArrayPrefixes,
    ) -> RequestOptions {
        RequestOptions {
            endpoint: endpoint.clone(),
            params: normalize(params, prefixes),
            headers: HeaderMap::new(),
        }
    }

    /// Sign and build the request of a single attempt without sending it.
    pub fn create_signed_request(
        &self,
        options: &RequestOptions,
    ) -> Result<http::Request<bytes::Bytes>> {
        let snapshot = self.snapshot();
        let host = snapshot.seller.region().descriptor().host;

        let signed = self.signer.sign(
            &options.endpoint,
            host,
            &options.params,
            &snapshot.credential,
            &snapshot.seller,
        )?;
        build_request(&signed, &options.endpoint, host, &options.headers, &self.settings)
    }

    /// Send the call described by `options` and return its result.
    ///
    /// Transient failures are retried according to the settings.
    pub async fn create_request(&self, options: &RequestOptions) -> Result<Output> {
        let snapshot = self.snapshot();
        let host = snapshot.seller.region().descriptor().host;
        let endpoint = &options.endpoint;
        let refresh = self.settings.refresh_signature_on_retry;

        let mut cached = None;
        let resp = RetryPolicy::from(&self.settings)
            .execute(&self.ctx, |attempt| {
                let signed = match cached.take() {
                    Some(signed) if !refresh => signed,
                    _ => {
                        if attempt > 0 {
                            debug!("signing attempt {} of {} again", attempt + 1, endpoint.action);
                        }
                        self.signer.sign(
                            endpoint,
                            host,
                            &options.params,
                            &snapshot.credential,
                            &snapshot.seller,
                        )?
                    }
                };
                let req = build_request(&signed, endpoint, host, &options.headers, &self.settings);
                cached = Some(signed);
                req
            })
            .await
            .map_err(|err| err.with_context(format!("action: {}", endpoint.action)))?;

        let body = String::from_utf8_lossy(resp.body()).into_owned();
        match self.settings.response_format {
            ResponseFormat::Raw => Ok(Output::Raw(body)),
            ResponseFormat::Structured => self
                .create_response(&body, &endpoint.action)
                .map(Output::Structured),
        }
    }

    /// Decode a raw response body of `action`.
    pub fn create_response(&self, raw: &str, action: &str) -> Result<Value> {
        decode(raw, action)
    }
}
