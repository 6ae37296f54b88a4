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

use std::fmt::{Debug, Formatter};

use mwsign_core::utils::Redact;
use mwsign_core::{Context, Error, Result};

use crate::constants::*;
use crate::{Credential, Seller};

/// Config carries the account information needed to build a client.
///
/// Fields left as `None` can be filled from the environment with
/// [`Config::from_env`].
#[derive(Clone, Default)]
pub struct Config {
    /// Developer access key id.
    pub access_key_id: Option<String>,
    /// Developer secret access key.
    pub secret_access_key: Option<String>,
    /// Seller id.
    pub seller_id: Option<String>,
    /// Auth token granted by the seller.
    pub auth_token: Option<String>,
    /// Region code such as `US` or `DE`.
    pub region: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("seller_id", &self.seller_id)
            .field("auth_token", &Redact::from(&self.auth_token))
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    /// Set the access key id.
    pub fn with_access_key_id(mut self, v: impl Into<String>) -> Self {
        self.access_key_id = Some(v.into());
        self
    }

    /// Set the secret access key.
    pub fn with_secret_access_key(mut self, v: impl Into<String>) -> Self {
        self.secret_access_key = Some(v.into());
        self
    }

    /// Set the seller id.
    pub fn with_seller_id(mut self, v: impl Into<String>) -> Self {
        self.seller_id = Some(v.into());
        self
    }

    /// Set the auth token.
    pub fn with_auth_token(mut self, v: impl Into<String>) -> Self {
        self.auth_token = Some(v.into());
        self
    }

    /// Set the region code.
    pub fn with_region(mut self, v: impl Into<String>) -> Self {
        self.region = Some(v.into());
        self
    }

    /// Fill unset fields from environment variables.
    ///
    /// Values already set take precedence over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let fields = [
            (&mut self.access_key_id, MWS_ACCESS_KEY_ID),
            (&mut self.secret_access_key, MWS_SECRET_ACCESS_KEY),
            (&mut self.seller_id, MWS_SELLER_ID),
            (&mut self.auth_token, MWS_AUTH_TOKEN_ENV),
            (&mut self.region, MWS_REGION),
        ];
        for (field, key) in fields {
            if field.is_none() {
                *field = ctx.env_var(key);
            }
        }

        self
    }

    /// Validate the config and split it into credential and seller.
    pub fn build(&self) -> Result<(Credential, Seller)> {
        let cred = Credential::new(
            self.access_key_id.clone().unwrap_or_default(),
            self.secret_access_key.clone().unwrap_or_default(),
        )?;

        let region = self
            .region
            .as_deref()
            .ok_or_else(|| Error::config_invalid("region must be set"))?;
        let mut seller = Seller::new(self.seller_id.clone().unwrap_or_default(), region)?;
        if let Some(token) = &self.auth_token {
            seller = seller.with_auth_token(token.as_str());
        }

        Ok((cred, seller))
    }
}
