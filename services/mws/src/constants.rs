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

use std::time::Duration;

// Query parameters used in mws requests.
pub const ACTION: &str = "Action";
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const MWS_AUTH_TOKEN: &str = "MWSAuthToken";
pub const TIMESTAMP: &str = "Timestamp";
pub const VERSION: &str = "Version";
pub const SIGNATURE: &str = "Signature";
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
pub const MERCHANT: &str = "Merchant";
pub const SELLER_ID: &str = "SellerId";

pub const HMAC_SHA256: &str = "HmacSHA256";
pub const SIGNATURE_VERSION_2: &str = "2";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Env values used in mws services.
pub const MWS_ACCESS_KEY_ID: &str = "MWS_ACCESS_KEY_ID";
pub const MWS_SECRET_ACCESS_KEY: &str = "MWS_SECRET_ACCESS_KEY";
pub const MWS_SELLER_ID: &str = "MWS_SELLER_ID";
pub const MWS_AUTH_TOKEN_ENV: &str = "MWS_AUTH_TOKEN";
pub const MWS_REGION: &str = "MWS_REGION";

// Error envelope.
pub const ERROR_RESPONSE: &str = "ErrorResponse";

// Error codes reported inside the error envelope.
pub const QUOTA_EXCEEDED: &str = "QuotaExceeded";
pub const REQUEST_THROTTLED: &str = "RequestThrottled";
pub const INPUT_STREAM_DISCONNECTED: &str = "InputStreamDisconnected";
pub const INVALID_PARAMETER_VALUE: &str = "InvalidParameterValue";
pub const ACCESS_DENIED: &str = "AccessDenied";
pub const INVALID_ACCESS_KEY_ID: &str = "InvalidAccessKeyId";
pub const SIGNATURE_DOES_NOT_MATCH: &str = "SignatureDoesNotMatch";
pub const INVALID_ADDRESS: &str = "InvalidAddress";
pub const INTERNAL_ERROR: &str = "InternalError";

/// Wait applied after a `QuotaExceeded` response; the quota refills hourly.
pub const QUOTA_BACKOFF: Duration = Duration::from_secs(3600);
