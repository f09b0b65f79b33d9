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

//! Signed query protocol client for Amazon SQS.
//!
//! This crate builds signature version 2 (HmacSHA256) requests for a fixed set
//! of queue actions, sends them as form encoded POSTs and decodes the XML
//! responses into typed results.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reqsqs_core::{Context, OsEnv, Result};
//! use reqsqs_http_send_reqwest::ReqwestHttpSend;
//! use reqsqs_sqs::{Client, Config, ReceiveOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Fails with ConfigInvalid if anything is missing.
//!     let config = Config::default().from_env(&ctx).build()?;
//!     let client = Client::new(ctx, config);
//!
//!     client.send_message("hello world").await?;
//!     match client.receive_message().await? {
//!         ReceiveOutcome::Received(msg) => {
//!             client.delete_message(&msg.receipt_handle).await?;
//!         }
//!         ReceiveOutcome::Empty(_) => println!("queue is empty"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints
//!
//! SendMessage, ReceiveMessage and DeleteMessage go to the queue endpoint
//! `https://sqs.<region>.amazonaws.com/<account_id>/<queue_name>/`.
//! CreateQueue, ListQueues and GetQueueUrl go to the account endpoint
//! `https://sqs.<region>.amazonaws.com/`.
//! Set `REQSQS_ENDPOINT` to replace `https://sqs.<region>.amazonaws.com`, for
//! example with a local queue server.
//!
//! ## Environment Variables
//!
//! ```bash
//! export AWS_REGION=us-east-1
//! export AWS_ACCESS_KEY_ID=your-access-key-id
//! export AWS_SECRET_ACCESS_KEY=your-secret-access-key
//! export REQSQS_ACCOUNT_ID=123456789012
//! export REQSQS_QUEUE_NAME=orders
//! ```

mod action;
pub use action::decode_message_body;
pub use action::encode_message_body;
pub use action::Action;
pub use action::ActionRequest;

mod client;
pub use client::Client;

mod config;
pub use config::ClientConfig;
pub use config::Config;

mod constants;
pub use constants::SQS_QUERY_ENCODE_SET;

mod dispatch;
pub use dispatch::dispatch;

mod endpoint;
pub use endpoint::account_endpoint;
pub use endpoint::queue_endpoint;
pub use endpoint::region_base_url;
pub use endpoint::Scope;

mod response;
pub use response::decode_error;
pub use response::decode_success;
pub use response::BasicResult;
pub use response::DecodeResponse;
pub use response::ErrorResult;
pub use response::QueueListResult;
pub use response::QueueUrlResult;
pub use response::ReceiveMessageResult;
pub use response::ReceiveOutcome;
pub use response::SendMessageResult;

mod sign_request;
pub use sign_request::sign;
pub use sign_request::sign_request;
pub use sign_request::string_to_sign;

#[cfg(test)]
mod testing;
