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

use std::fmt;
use thiserror::Error;

/// The error type for mwsign operations
#[derive(Error, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    context: Vec<String>,
    response: Option<RemoteResponse>,
}

/// The kind of error that occurred
///
/// Every failure surfaced by mwsign carries exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration error (missing fields, empty credentials, unknown region)
    ConfigInvalid,

    /// Request cannot be signed or built (unflattened arrays, bad uri, etc.)
    RequestInvalid,

    /// The transport failed before a response was received
    Transport,

    /// The transport timed out
    Timeout,

    /// The seller exhausted the hourly request quota (503 QuotaExceeded)
    QuotaExceeded,

    /// The request was throttled (503 RequestThrottled)
    Throttled,

    /// The remote lost the request body (400 InputStreamDisconnected)
    InputStreamDisconnected,

    /// A parameter was rejected (400 InvalidParameterValue)
    InvalidParameterValue,

    /// Access was denied (401 AccessDenied)
    AccessDenied,

    /// The access key id is unknown (403 InvalidAccessKeyId)
    InvalidAccessKeyId,

    /// The computed signature was rejected (403 SignatureDoesNotMatch)
    SignatureDoesNotMatch,

    /// The resource path does not exist (404 InvalidAddress)
    InvalidAddress,

    /// The remote failed internally (500 InternalError)
    InternalError,

    /// The remote returned an error envelope that matches no known condition
    UndefinedRemote,

    /// Every attempt failed with a retryable condition
    RetriesExhausted,

    /// The response body could not be decoded into the expected shape
    MalformedResponse,

    /// Unexpected errors (I/O, runtime, etc.)
    Unexpected,
}

/// Metadata of the remote response that produced an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteResponse {
    /// HTTP status code, `0` when the error was found without a status.
    pub status: u16,
    /// `Code` of the error envelope.
    pub code: Option<String>,
    /// `Message` of the error envelope.
    pub message: Option<String>,
    /// `RequestId` of the error envelope.
    pub request_id: Option<String>,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            context: Vec::new(),
            response: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a context line, rendered after the message.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attach the remote response that caused this error.
    pub fn with_response(mut self, response: RemoteResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context lines
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Get the remote response metadata, if any.
    pub fn response(&self) -> Option<&RemoteResponse> {
        self.response.as_ref()
    }

    /// Check if this error can be recovered by retrying the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout | ErrorKind::QuotaExceeded | ErrorKind::Throttled
        )
    }

}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a retries exhausted error
    pub fn retries_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RetriesExhausted, message)
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(resp) = &self.response {
            write!(f, " (status: {}", resp.status)?;
            if let Some(code) = &resp.code {
                write!(f, ", code: {code}")?;
            }
            if let Some(request_id) = &resp.request_id {
                write!(f, ", request_id: {request_id}")?;
            }
            write!(f, ")")?;
        }
        for ctx in &self.context {
            write!(f, "\n  {ctx}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Timeout => write!(f, "request timed out"),
            ErrorKind::QuotaExceeded => write!(f, "quota exceeded"),
            ErrorKind::Throttled => write!(f, "request throttled"),
            ErrorKind::InputStreamDisconnected => write!(f, "input stream disconnected"),
            ErrorKind::InvalidParameterValue => write!(f, "invalid parameter value"),
            ErrorKind::AccessDenied => write!(f, "access denied"),
            ErrorKind::InvalidAccessKeyId => write!(f, "invalid access key id"),
            ErrorKind::SignatureDoesNotMatch => write!(f, "signature does not match"),
            ErrorKind::InvalidAddress => write!(f, "invalid address"),
            ErrorKind::InternalError => write!(f, "remote internal error"),
            ErrorKind::UndefinedRemote => write!(f, "undefined remote error"),
            ErrorKind::RetriesExhausted => write!(f, "retries exhausted"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::malformed_response(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
