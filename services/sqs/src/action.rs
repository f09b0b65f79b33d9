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

use percent_encoding::{percent_decode_str, utf8_percent_encode};
use reqsqs_core::{Error, Result};

use crate::constants::*;
use crate::endpoint::Scope;

/// Action is one request of the query protocol with its typed arguments.
///
/// Required parameters are fields of the variant, so they can't be left out
/// or misspelled. [`Action::into_request`] flattens it into wire parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Enqueue `message_body` on the configured queue.
    SendMessage {
        /// Message text, sent as is: the parameter encoding escapes it once.
        message_body: String,
    },
    /// Take at most one message from the configured queue.
    ReceiveMessage,
    /// Delete a received message.
    DeleteMessage {
        /// Receipt handle returned by ReceiveMessage.
        receipt_handle: String,
    },
    /// Create a queue in the account.
    CreateQueue {
        /// Name of the new queue.
        queue_name: String,
        /// Queue attributes, numbered from 1 in this order.
        attributes: Vec<(String, String)>,
    },
    /// List the queues of the account.
    ListQueues {
        /// Only list queues whose name starts with this prefix.
        queue_name_prefix: Option<String>,
    },
    /// Look up the url of a queue by name.
    GetQueueUrl {
        /// Name of the queue.
        queue_name: String,
    },
}

impl Action {
    /// Protocol name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SendMessage { .. } => "SendMessage",
            Action::ReceiveMessage => "ReceiveMessage",
            Action::DeleteMessage { .. } => "DeleteMessage",
            Action::CreateQueue { .. } => "CreateQueue",
            Action::ListQueues { .. } => "ListQueues",
            Action::GetQueueUrl { .. } => "GetQueueUrl",
        }
    }

    /// Endpoint class the action must be sent to.
    pub fn scope(&self) -> Scope {
        match self {
            Action::SendMessage { .. } | Action::ReceiveMessage | Action::DeleteMessage { .. } => {
                Scope::Queue
            }
            Action::CreateQueue { .. } | Action::ListQueues { .. } | Action::GetQueueUrl { .. } => {
                Scope::Account
            }
        }
    }

    /// Reject arguments the service can never accept.
    pub fn validate(&self) -> Result<()> {
        let empty = match self {
            Action::DeleteMessage { receipt_handle } if receipt_handle.is_empty() => {
                Some("receipt handle")
            }
            Action::CreateQueue { queue_name, .. } | Action::GetQueueUrl { queue_name }
                if queue_name.is_empty() =>
            {
                Some("queue name")
            }
            _ => None,
        };

        match empty {
            Some(what) => Err(Error::request_invalid(format!("{what} must not be empty"))
                .with_context(format!("action: {}", self.name()))),
            None => Ok(()),
        }
    }

    /// Flatten the action into its wire parameters.
    pub fn into_request(self) -> ActionRequest {
        let action = self.name();
        let scope = self.scope();

        let mut parameters = BTreeMap::new();
        match self {
            Action::SendMessage { message_body } => {
                parameters.insert(PARAM_MESSAGE_BODY.to_string(), message_body);
            }
            Action::ReceiveMessage => {}
            Action::DeleteMessage { receipt_handle } => {
                parameters.insert(PARAM_RECEIPT_HANDLE.to_string(), receipt_handle);
            }
            Action::CreateQueue {
                queue_name,
                attributes,
            } => {
                parameters.insert(PARAM_QUEUE_NAME.to_string(), queue_name);
                for (idx, (name, value)) in attributes.into_iter().enumerate() {
                    let n = idx + 1;
                    parameters.insert(format!("Attribute.{n}.Name"), name);
                    parameters.insert(format!("Attribute.{n}.Value"), value);
                }
            }
            Action::ListQueues { queue_name_prefix } => {
                if let Some(prefix) = queue_name_prefix {
                    parameters.insert(PARAM_QUEUE_NAME_PREFIX.to_string(), prefix);
                }
            }
            Action::GetQueueUrl { queue_name } => {
                parameters.insert(PARAM_QUEUE_NAME.to_string(), queue_name);
            }
        }

        ActionRequest {
            action,
            scope,
            parameters,
        }
    }
}

/// ActionRequest is an action flattened into wire parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Protocol name of the action, sent as `Action`.
    pub action: &'static str,
    /// Endpoint class to send to.
    pub scope: Scope,
    /// Action specific parameters, not encoded yet.
    pub parameters: BTreeMap<String, String>,
}

/// Escape a message body the way it travels on the wire.
///
/// The dispatcher applies exactly this encoding to the `MessageBody` parameter.
pub fn encode_message_body(body: &str) -> String {
    utf8_percent_encode(body, &SQS_QUERY_ENCODE_SET).to_string()
}

/// Unescape a message body returned by ReceiveMessage.
pub fn decode_message_body(body: &str) -> Result<String> {
    percent_decode_str(body)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|e| {
            Error::decode("message body is not valid utf-8 after unescaping")
                .with_source(e)
                .with_context(format!("body_length: {}", body.len()))
        })
}
