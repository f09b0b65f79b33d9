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

//! Reqwest-based HTTP transport for reqsqs.
//!
//! `ReqwestHttpSend` implements [`HttpSend`] on top of a shared
//! [`reqwest::Client`], which pools connections and is safe to use from
//! concurrent calls.
//!
//! ```no_run
//! use reqsqs_core::{Context, OsEnv};
//! use reqsqs_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .expect("client must build");
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::new(client))
//!     .with_env(OsEnv);
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqsqs_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// HttpSend implementation backed by reqwest.
///
/// Timeouts, proxies and TLS settings belong to the wrapped client, this type
/// adds none of its own.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        let req = Request::try_from(req).map_err(|e| {
            Error::unexpected("failed to convert request for reqwest")
                .with_source(e)
                .with_context(format!("uri: {uri}"))
        })?;

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::transport("failed to send request")
                    .with_source(e)
                    .with_context(format!("uri: {uri}"))
            })?
            .into();
        debug!("received response from {uri}: {}", resp.status());

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::transport("failed to read response body")
                    .with_source(e)
                    .with_context(format!("uri: {uri}"))
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
