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

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context holds the pluggable pieces a client needs to talk to the service.
///
/// ## Important
///
/// reqsqs provides NO default implementations here. Unconfigured components use
/// a no-op implementation that returns errors or empty values when called.
///
/// ## Example
///
/// ```
/// use reqsqs_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    ///
    /// Use the `with_*` methods to configure the components you need.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Send http request and return the response as string.
    ///
    /// A body that is not valid utf-8 fails with [`crate::ErrorKind::Decode`],
    /// carrying the response status.
    pub async fn http_send_as_string(
        &self,
        req: http::Request<Bytes>,
    ) -> Result<http::Response<String>> {
        let (parts, body) = self.http.http_send(req).await?.into_parts();
        let body = String::from_utf8(body.to_vec()).map_err(|e| {
            Error::decode("response body is not valid utf-8")
                .with_source(e)
                .with_status(parts.status)
                .with_context(format!("response_length: {}", body.len()))
        })?;
        Ok(http::Response::from_parts(parts, body))
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }
}

/// HttpSend is the transport used to deliver signed requests.
///
/// Implementations must be safe to share between concurrent calls. They should
/// report connection level failures as [`crate::ErrorKind::Transport`] and
/// return every received response as is, whatever its status.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Env abstracts access to environment variables.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
///
/// This is used when no environment is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_default_context_has_no_transport() {
        let ctx = Context::default();
        let req = http::Request::builder()
            .method(http::Method::POST)
            .uri("https://sqs.us-east-1.amazonaws.com/")
            .body(Bytes::new())
            .expect("request must be valid");

        let err = ctx.http_send(req).await.expect_err("noop must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(ctx.env_var("AWS_REGION"), None);
    }

    #[derive(Debug)]
    struct FixedBody(&'static [u8]);

    #[async_trait::async_trait]
    impl HttpSend for FixedBody {
        async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            Ok(http::Response::new(Bytes::from_static(self.0)))
        }
    }

    fn empty_request() -> http::Request<Bytes> {
        http::Request::builder()
            .method(http::Method::POST)
            .uri("https://sqs.us-east-1.amazonaws.com/")
            .body(Bytes::new())
            .expect("request must be valid")
    }

    #[tokio::test]
    async fn test_http_send_as_string() -> Result<()> {
        let ctx = Context::new().with_http_send(FixedBody(b"<Body>caf\xC3\xA9</Body>"));

        let resp = ctx.http_send_as_string(empty_request()).await?;
        assert_eq!(resp.body(), "<Body>caf\u{e9}</Body>");
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_as_string_rejects_invalid_utf8() {
        let ctx = Context::new().with_http_send(FixedBody(b"<Body>caf\xFF\xFE</Body>"));

        let err = ctx
            .http_send_as_string(empty_request())
            .await
            .expect_err("invalid utf-8 must be rejected");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.status(), Some(http::StatusCode::OK));
    }

    #[test]
    fn test_static_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([("AWS_REGION".to_string(), "eu-west-1".to_string())]),
        });

        assert_eq!(ctx.env_var("AWS_REGION").as_deref(), Some("eu-west-1"));
        assert_eq!(ctx.env_vars().len(), 1);
    }
}
