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

use http::Method;
use log::debug;
use reqsqs_core::hash::base64_hmac_sha256;
use reqsqs_core::{Result, SigningRequest};

use crate::constants::SQS_QUERY_ENCODE_SET;

/// Sign `params` for a `method` request to `endpoint` with signature version 2.
///
/// Returns the base64 encoded HmacSHA256 signature, not percent encoded yet.
/// An endpoint without a host fails with
/// [`reqsqs_core::ErrorKind::SigningFailed`].
pub fn sign(
    endpoint: &str,
    method: Method,
    secret_access_key: &str,
    params: &BTreeMap<String, String>,
) -> Result<String> {
    let mut req = SigningRequest::build(method, endpoint)?;
    req.params.extend(params.clone());

    Ok(sign_request(&req, secret_access_key))
}

/// Sign a prepared signing request.
pub fn sign_request(req: &SigningRequest, secret_access_key: &str) -> String {
    let string_to_sign = string_to_sign(req);
    debug!("calculated string to sign: {string_to_sign}");

    base64_hmac_sha256(secret_access_key.as_bytes(), string_to_sign.as_bytes())
}

/// Build the canonical string of a request.
///
/// ```text
/// POST
/// sqs.us-east-1.amazonaws.com
/// /123456789012/orders/
/// AWSAccessKeyId=AKIDEXAMPLE&Action=SendMessage&...
/// ```
pub fn string_to_sign(req: &SigningRequest) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        req.method,
        req.host(),
        req.path,
        req.params_to_percent_encoded_string(&SQS_QUERY_ENCODE_SET)
    )
}
