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
use mwsign_core::{Error, Result, SigningCredential};

use crate::Region;

/// Credential that holds the developer access key and secret.
///
/// Both fields are validated as non-empty at construction and never change
/// afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_key_id: String,
    secret_access_key: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// Returns `ConfigInvalid` if either field is empty.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self> {
        let cred = Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        };
        if !cred.is_valid() {
            return Err(Error::config_invalid(
                "access_key_id and secret_access_key must both be set",
            ));
        }

        Ok(cred)
    }

    /// Access key id sent as `AWSAccessKeyId`.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret used as the HMAC key.
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

/// Seller (principal) the requests are made on behalf of.
#[derive(Clone, PartialEq, Eq)]
pub struct Seller {
    id: String,
    auth_token: Option<String>,
    region: Region,
}

impl Seller {
    /// Create a seller registered in the region named by `region_code`.
    ///
    /// Returns `ConfigInvalid` for an empty id or an unknown region code.
    pub fn new(id: impl Into<String>, region_code: &str) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::config_invalid("seller id must be set"));
        }

        Ok(Self {
            id,
            auth_token: None,
            region: region_code.parse()?,
        })
    }

    /// Set the `MWSAuthToken` granted to the developer by this seller.
    ///
    /// An empty token is treated as absent.
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        let token = auth_token.into();
        self.auth_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Return a copy of this seller registered in another region.
    pub fn with_region(&self, region: Region) -> Self {
        Self {
            region,
            ..self.clone()
        }
    }

    /// Seller id, sent as `SellerId` or `Merchant`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Auth token, sent as `MWSAuthToken` when present.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Region of this seller.
    pub fn region(&self) -> Region {
        self.region
    }
}

impl Debug for Seller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seller")
            .field("id", &self.id)
            .field("auth_token", &Redact::from(&self.auth_token))
            .field("region", &self.region)
            .finish()
    }
}
