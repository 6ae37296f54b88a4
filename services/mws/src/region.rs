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

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use mwsign_core::{Error, Result};

/// Region (area) an MWS account is registered in.
///
/// - [Amazon MWS endpoints and MarketplaceId values](https://docs.developer.amazonservices.com/en_US/dev_guide/DG_Endpoints.html)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Brazil
    BR,
    /// Canada
    CA,
    /// Mexico
    MX,
    /// United States
    US,
    /// United Arab Emirates
    AE,
    /// Germany
    DE,
    /// Spain
    ES,
    /// France
    FR,
    /// United Kingdom
    GB,
    /// India
    IN,
    /// Italy
    IT,
    /// Turkey
    TR,
    /// Australia
    AU,
    /// Japan
    JP,
    /// China
    CN,
}

/// Merchant id and host of a region.
///
/// Both values flow into the canonical string, so they must match the remote
/// byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// Marketplace id of the region.
    pub merchant_id: &'static str,
    /// Network host serving the region.
    pub host: &'static str,
}

impl Region {
    /// All supported regions.
    pub const ALL: [Region; 15] = [
        Region::BR,
        Region::CA,
        Region::MX,
        Region::US,
        Region::AE,
        Region::DE,
        Region::ES,
        Region::FR,
        Region::GB,
        Region::IN,
        Region::IT,
        Region::TR,
        Region::AU,
        Region::JP,
        Region::CN,
    ];

    /// Two-letter code of this region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::BR => "BR",
            Region::CA => "CA",
            Region::MX => "MX",
            Region::US => "US",
            Region::AE => "AE",
            Region::DE => "DE",
            Region::ES => "ES",
            Region::FR => "FR",
            Region::GB => "GB",
            Region::IN => "IN",
            Region::IT => "IT",
            Region::TR => "TR",
            Region::AU => "AU",
            Region::JP => "JP",
            Region::CN => "CN",
        }
    }

    /// Look up the merchant id and host of this region.
    pub fn descriptor(&self) -> RegionDescriptor {
        let (merchant_id, host) = match self {
            Region::BR => ("A2Q3Y263D00KWC", "mws.amazonservices.com"),
            Region::CA => ("A2EUQ1WTGCTBG2", "mws.amazonservices.ca"),
            Region::MX => ("A1AM78C64UM0Y8", "mws.amazonservices.com.mx"),
            Region::US => ("ATVPDKIKX0DER", "mws.amazonservices.com"),
            Region::AE => ("A2VIGQ35RCS4UG", "mws.amazonservices.ae"),
            Region::DE => ("A1PA6795UKMFR9", "mws-eu.amazonservices.com"),
            Region::ES => ("A1RKKUPIHCS9HS", "mws-eu.amazonservices.com"),
            Region::FR => ("A13V1IB3VIYZZH", "mws-eu.amazonservices.com"),
            Region::GB => ("A1F83G8C2ARO7P", "mws-eu.amazonservices.com"),
            Region::IN => ("A21TJRUUN4KGV", "mws.amazonservices.in"),
            Region::IT => ("APJ6JRA9NG5V4", "mws-eu.amazonservices.com"),
            Region::TR => ("A33AVAJ2PDY3EV", "mws-eu.amazonservices.com"),
            Region::AU => ("A39IBJ37TRP1C6", "mws.amazonservices.com.au"),
            Region::JP => ("A1VC38T7YXB528", "mws.amazonservices.jp"),
            Region::CN => ("AAHKV2X7AFYLW", "mws.amazonservices.com.cn"),
        };

        RegionDescriptor { merchant_id, host }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::config_invalid(format!("unknown region code: {s:?}")))
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
