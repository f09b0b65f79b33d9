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

use reqsqs_core::{Context, OsEnv, Result};
use reqsqs_http_send_reqwest::ReqwestHttpSend;
use reqsqs_sqs::{Client, ClientConfig, Config};

/// Build a context reading the process environment and sending with reqwest.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Same as [`default_context`] but sending with the given reqwest client.
///
/// Use this to configure timeouts or proxies.
pub fn context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv)
}

/// Build a client for `config` on top of [`default_context`].
pub fn default_client(config: ClientConfig) -> Client {
    Client::new(default_context(), config)
}

/// Build a client configured entirely from the process environment.
///
/// Fails with [`reqsqs_core::ErrorKind::ConfigInvalid`] naming every
/// missing variable.
pub fn client_from_env() -> Result<Client> {
    let ctx = default_context();
    let config = Config::default().from_env(&ctx).build()?;
    Ok(Client::new(ctx, config))
}
