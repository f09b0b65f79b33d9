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

use std::collections::BTreeMap;

use http::uri::Authority;
use http::uri::Scheme;
use http::Method;
use http::Uri;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;

use crate::{Error, Result};

/// Signing context for a query protocol request.
///
/// Parameters are kept in a sorted map: keys are unique and iteration follows
/// byte order, which is the order the canonical string needs.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, `/` when the endpoint has none.
    pub path: String,
    /// Request parameters, not encoded.
    pub params: BTreeMap<String, String>,
}

impl SigningRequest {
    /// Build a signing context for `method` against `endpoint`.
    ///
    /// Fails with [`crate::ErrorKind::SigningFailed`] if the endpoint is not an
    /// absolute URL: there is nothing meaningful to sign without a host.
    pub fn build(method: Method, endpoint: &str) -> Result<Self> {
        let uri: Uri = endpoint.parse().map_err(|e: http::uri::InvalidUri| {
            Error::signing_failed("endpoint is not a valid url")
                .with_source(e)
                .with_context(format!("endpoint: {endpoint}"))
        })?;
        let parts = uri.into_parts();

        let scheme = parts.scheme.ok_or_else(|| {
            Error::signing_failed("endpoint without scheme is invalid for signing")
                .with_context(format!("endpoint: {endpoint}"))
        })?;
        let authority = parts.authority.ok_or_else(|| {
            Error::signing_failed("endpoint without authority is invalid for signing")
                .with_context(format!("endpoint: {endpoint}"))
        })?;
        if authority.host().is_empty() {
            return Err(Error::signing_failed("endpoint without host is invalid for signing")
                .with_context(format!("endpoint: {endpoint}")));
        }

        let (path, query) = match &parts.path_and_query {
            Some(paq) if !paq.path().is_empty() => (paq.path().to_string(), paq.query()),
            Some(paq) => ("/".to_string(), paq.query()),
            None => ("/".to_string(), None),
        };
        let params: BTreeMap<String, String> = query
            .map(|v| {
                form_urlencoded::parse(v.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(SigningRequest {
            method,
            scheme,
            authority,
            path,
            params,
        })
    }

    /// Lowercased host, with the port when the endpoint carries one.
    pub fn host(&self) -> String {
        self.authority.as_str().to_ascii_lowercase()
    }

    /// Endpoint url without any query.
    pub fn endpoint(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority, self.path)
    }

    /// Insert a parameter, replacing and returning the previous value.
    #[inline]
    pub fn param_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.params.insert(key.into(), value.into())
    }

    /// Get a parameter value by key.
    #[inline]
    pub fn param_get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Convert sorted params to percent encoded string.
    ///
    /// ```shell
    /// [(b, "x y"), (a, "1")] => "a=1&b=x%20y"
    /// ```
    pub fn params_to_percent_encoded_string(&self, set: &'static AsciiSet) -> String {
        let mut s = String::with_capacity(self.params_size() * 2);

        for (idx, (k, v)) in self.params.iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.extend(utf8_percent_encode(k, set));
            s.push('=');
            s.extend(utf8_percent_encode(v, set));
        }

        s
    }

    /// Get params size before encoding.
    #[inline]
    pub fn params_size(&self) -> usize {
        self.params
            .iter()
            .map(|(k, v)| k.len() + v.len() + 2)
            .sum::<usize>()
    }
}
