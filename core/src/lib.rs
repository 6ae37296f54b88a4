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

//! Core components for signing and sending MWS requests.
//!
//! This crate provides the foundational types and traits for the mwsign workspace.
//!
//! ## Overview
//!
//! - **Context**: A container that holds the HTTP, sleep and environment
//!   implementations
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`)
//!   and validation (`SigningCredential`)
//! - **Error**: A single error type whose [`ErrorKind`] names every failure a call can end with
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use mwsign_core::{Context, HttpSend, Result};
//!
//! #[derive(Debug)]
//! struct EchoHttpSend;
//!
//! #[async_trait]
//! impl HttpSend for EchoHttpSend {
//!     async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(req.into_body()))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(EchoHttpSend);
//! let resp = ctx.http_send(http::Request::new(Bytes::from("hello"))).await?;
//! assert_eq!(resp.body().as_ref(), b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: Time helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::NoopSleep;
pub use context::OsEnv;
pub use context::RequestTimeout;
pub use context::Sleep;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, RemoteResponse, Result};

mod api;
pub use api::{ProvideCredential, SigningCredential};
