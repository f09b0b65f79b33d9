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

use http::StatusCode;
use thiserror::Error;

/// The error type for reqsqs operations
#[derive(Error, Debug)]
#[error("{kind}: {message}{}", format_context(.context))]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    context: Vec<String>,
    status: Option<StatusCode>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required identifier or key is missing from the configuration.
    ConfigInvalid,

    /// An action argument is unusable (empty receipt handle, queue name, ...).
    RequestInvalid,

    /// The request could not be signed, most likely because the endpoint is malformed.
    SigningFailed,

    /// The request never got a response: connection, TLS or I/O failure.
    Transport,

    /// The service answered with a non-2xx status.
    Protocol,

    /// The response body is not valid XML or lacks the expected structure.
    Decode,

    /// Unexpected errors that don't belong to any other kind.
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            context: Vec::new(),
            status: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a line of context, rendered after the message.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attach the HTTP status the service responded with.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without context.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the attached context lines.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Get the HTTP status, only set for protocol errors.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Downcast the source error into a concrete type.
    ///
    /// Protocol errors carry the decoded service error as their source, this is
    /// the way to get it back.
    pub fn source_as<T>(&self) -> Option<&T>
    where
        T: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.source.as_ref()?.downcast_ref::<T>()
    }

    /// Check if the service rejected the request.
    pub fn is_protocol_error(&self) -> bool {
        self.kind == ErrorKind::Protocol
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

    /// Create a signing failed error
    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningFailed, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a protocol error for the given status
    pub fn protocol(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, message).with_status(status)
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::SigningFailed => write!(f, "signing failed"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Protocol => write!(f, "protocol error"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

fn format_context(context: &[String]) -> String {
    if context.is_empty() {
        return String::new();
    }
    format!(" ({})", context.join(", "))
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::signing_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
