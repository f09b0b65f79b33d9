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

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use reqsqs_core::time::{format_rfc3339, DateTime};
use reqsqs_core::{Context, Result, SigningRequest};

use crate::action::ActionRequest;
use crate::config::ClientConfig;
use crate::constants::*;
use crate::sign_request::sign_request;

/// Sign `request` and send it as one form encoded POST.
///
/// The response is returned whatever its status, the caller decides how to
/// decode it. Nothing is sent if signing fails.
pub async fn dispatch(
    ctx: &Context,
    config: &ClientConfig,
    request: ActionRequest,
    now: DateTime,
) -> Result<http::Response<String>> {
    let endpoint = config.endpoint(request.scope);
    debug!("dispatching {} to {endpoint}", request.action);

    let mut req = SigningRequest::build(Method::POST, &endpoint)?;
    req.param_insert(PARAM_ACTION, request.action);
    req.param_insert(PARAM_ACCESS_KEY_ID, config.access_key_id());
    req.param_insert(PARAM_SIGNATURE_VERSION, SIGNATURE_VERSION);
    req.param_insert(PARAM_SIGNATURE_METHOD, SIGNATURE_METHOD);
    req.param_insert(PARAM_VERSION, API_VERSION);
    req.param_insert(PARAM_TIMESTAMP, format_rfc3339(now));
    req.params.extend(request.parameters);

    let signature = sign_request(&req, config.secret_access_key());
    let body = format!(
        "{}&{}={}",
        req.params_to_percent_encoded_string(&SQS_QUERY_ENCODE_SET),
        PARAM_SIGNATURE,
        utf8_percent_encode(&signature, &SQS_QUERY_ENCODE_SET)
    );

    let http_req = http::Request::builder()
        .method(Method::POST)
        .uri(req.endpoint())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Bytes::from(body))?;

    let resp = ctx.http_send_as_string(http_req).await?;
    debug!(
        "{} responded with status {}",
        request.action,
        resp.status()
    );
    Ok(resp)
}
