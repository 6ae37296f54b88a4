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

//! Signed requests for the Amazon Marketplace Web Service.
//!
//! Parameters are normalized, signed with `HmacSHA256` (`SignatureVersion=2`),
//! sent through the transport carried by [`mwsign_core::Context`] with bounded
//! retry, and decoded from XML into a [`serde_json::Value`] tree.
//!
//! ## Example
//!
//! ```no_run
//! use mwsign_core::{Context, OsEnv};
//! use mwsign_http_send_reqwest::ReqwestHttpSend;
//! use mwsign_mws::endpoint::orders;
//! use mwsign_mws::{Client, Config, ParamValue, Params, Settings};
//! use mwsign_sleep_tokio::TokioSleep;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_sleep(TokioSleep)
//!     .with_env(OsEnv);
//! let client = Client::from_config(ctx, Config::default(), Settings::default())?;
//!
//! let params = Params::from([
//!     ("CreatedAfter".to_string(), ParamValue::from("2020-01-01T00:00:00Z")),
//!     ("MarketplaceId".to_string(), ParamValue::from(vec![client.marketplace_id()])),
//! ]);
//! let prefixes = orders::list_orders_prefixes();
//! let options = client.create_options(&orders::LIST_ORDERS, &params, &prefixes);
//! let output = client.create_request(&options).await?;
//! println!("{output:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;

mod region;
pub use region::{Region, RegionDescriptor};

mod credential;
pub use credential::{Credential, Seller};

mod config;
pub use config::Config;

mod settings;
pub use settings::{ResponseFormat, Settings};

mod provide_credential;
pub use provide_credential::{EnvCredentialProvider, StaticCredentialProvider};

pub mod endpoint;
pub use endpoint::{ArrayPrefixes, Endpoint};

mod params;
pub use params::{normalize, ParamValue, Params};

mod sign_request;
pub use sign_request::{RequestSigner, SignedParams};

mod build;
pub use build::build_request;

mod retry;
pub use retry::{classify, Outcome, RetryPolicy};

pub mod decode;

mod client;
pub use client::{Client, Output, RequestOptions};
