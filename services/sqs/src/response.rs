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

use std::any::type_name;

use quick_xml::de;
use reqsqs_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::action::decode_message_body;

/// Result of SendMessage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessageResult {
    /// Id assigned to the message by the service.
    pub message_id: String,
    /// MD5 digest of the message body as received by the service.
    pub message_md5_digest: String,
    /// Opaque request id.
    pub request_id: String,
}

/// A message taken by ReceiveMessage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiveMessageResult {
    /// Id of the message.
    pub message_id: String,
    /// MD5 digest of the message body.
    pub message_md5_digest: String,
    /// Message body, unescaped.
    pub message_body: String,
    /// Handle to pass to DeleteMessage.
    pub receipt_handle: String,
    /// Opaque request id.
    pub request_id: String,
}

/// Outcome of ReceiveMessage.
///
/// An empty queue is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// A message was received.
    Received(ReceiveMessageResult),
    /// The queue had no message to hand out.
    Empty(BasicResult),
}

impl ReceiveOutcome {
    /// Returns true if no message was received.
    pub fn is_empty(&self) -> bool {
        matches!(self, ReceiveOutcome::Empty(_))
    }

    /// Get the received message, if any.
    pub fn message(&self) -> Option<&ReceiveMessageResult> {
        match self {
            ReceiveOutcome::Received(v) => Some(v),
            ReceiveOutcome::Empty(_) => None,
        }
    }

    /// Take the received message, if any.
    pub fn into_message(self) -> Option<ReceiveMessageResult> {
        match self {
            ReceiveOutcome::Received(v) => Some(v),
            ReceiveOutcome::Empty(_) => None,
        }
    }

    /// Opaque request id.
    pub fn request_id(&self) -> &str {
        match self {
            ReceiveOutcome::Received(v) => &v.request_id,
            ReceiveOutcome::Empty(v) => &v.request_id,
        }
    }
}

/// Result of an action that only returns response metadata, like DeleteMessage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicResult {
    /// Opaque request id.
    pub request_id: String,
}

/// Result of CreateQueue and GetQueueUrl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueUrlResult {
    /// Url of the queue.
    pub queue_url: String,
    /// Opaque request id.
    pub request_id: String,
}

/// Result of ListQueues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueListResult {
    /// Urls of the listed queues, in response order.
    pub queue_urls: Vec<String>,
    /// Opaque request id.
    pub request_id: String,
}

/// Error reported by the service in an `ErrorResponse` body.
///
/// Carried as the source of [`reqsqs_core::ErrorKind::Protocol`] errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Type: {kind}, Code: {code}, Message: {message}")]
pub struct ErrorResult {
    /// Fault side, `Sender` or `Receiver`.
    pub kind: String,
    /// Error code, e.g. `InvalidParameterValue`.
    pub code: String,
    /// Human readable message.
    pub message: String,
}

/// DecodeResponse is implemented by every typed success result.
pub trait DecodeResponse: Sized {
    /// Shape of the XML document.
    type Document: DeserializeOwned;

    /// Flatten the decoded document.
    fn from_document(doc: Self::Document) -> Result<Self>;
}

/// Decode a success response body.
///
/// Malformed XML and missing result elements fail with
/// [`reqsqs_core::ErrorKind::Decode`].
pub fn decode_success<T: DecodeResponse>(body: &str) -> Result<T> {
    let doc: T::Document = de::from_str(body).map_err(|e| {
        Error::decode("failed to decode response")
            .with_source(e)
            .with_context(format!("response_type: {}", type_name::<T>()))
            .with_context(format!("response_length: {}", body.len()))
    })?;

    T::from_document(doc)
}

/// Decode an `ErrorResponse` body.
pub fn decode_error(body: &str) -> Result<ErrorResult> {
    let doc: ErrorResponse = de::from_str(body).map_err(|e| {
        Error::decode("failed to decode error response")
            .with_source(e)
            .with_context(format!("response_length: {}", body.len()))
    })?;

    Ok(ErrorResult {
        kind: doc.error.kind,
        code: doc.error.code,
        message: doc.error.message,
    })
}

impl DecodeResponse for SendMessageResult {
    type Document = SendMessageResponse;

    fn from_document(doc: SendMessageResponse) -> Result<Self> {
        Ok(SendMessageResult {
            message_id: doc.result.message_id,
            message_md5_digest: doc.result.md5_of_message_body,
            request_id: doc.response_metadata.request_id,
        })
    }
}

impl DecodeResponse for ReceiveOutcome {
    type Document = ReceiveMessageResponse;

    fn from_document(doc: ReceiveMessageResponse) -> Result<Self> {
        let request_id = doc.response_metadata.request_id;
        let message = doc.result.messages.into_iter().next().unwrap_or_default();
        if message.body.is_empty() && message.md5_of_body.is_empty() {
            return Ok(ReceiveOutcome::Empty(BasicResult { request_id }));
        }

        Ok(ReceiveOutcome::Received(ReceiveMessageResult {
            message_id: message.message_id,
            message_md5_digest: message.md5_of_body,
            message_body: decode_message_body(&message.body)?,
            receipt_handle: message.receipt_handle,
            request_id,
        }))
    }
}

impl DecodeResponse for BasicResult {
    type Document = MetadataResponse;

    fn from_document(doc: MetadataResponse) -> Result<Self> {
        Ok(BasicResult {
            request_id: doc.response_metadata.request_id,
        })
    }
}

impl DecodeResponse for QueueUrlResult {
    type Document = QueueUrlResponse;

    fn from_document(doc: QueueUrlResponse) -> Result<Self> {
        Ok(QueueUrlResult {
            queue_url: doc.result.queue_url,
            request_id: doc.response_metadata.request_id,
        })
    }
}

impl DecodeResponse for QueueListResult {
    type Document = ListQueuesResponse;

    fn from_document(doc: ListQueuesResponse) -> Result<Self> {
        Ok(QueueListResult {
            queue_urls: doc.result.queue_urls,
            request_id: doc.response_metadata.request_id,
        })
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ResponseMetadata {
    request_id: String,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessageResponse {
    #[serde(rename = "SendMessageResult")]
    result: SendMessageResultXml,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SendMessageResultXml {
    message_id: String,
    #[serde(rename = "MD5OfMessageBody")]
    md5_of_message_body: String,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiveMessageResponse {
    #[serde(rename = "ReceiveMessageResult")]
    result: ReceiveMessageResultXml,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ReceiveMessageResultXml {
    #[serde(rename = "Message")]
    messages: Vec<MessageXml>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct MessageXml {
    message_id: String,
    receipt_handle: String,
    #[serde(rename = "MD5OfBody")]
    md5_of_body: String,
    body: String,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataResponse {
    response_metadata: ResponseMetadata,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueUrlResponse {
    #[serde(rename = "CreateQueueResult", alias = "GetQueueUrlResult")]
    result: QueueUrlResultXml,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct QueueUrlResultXml {
    queue_url: String,
}

#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListQueuesResponse {
    #[serde(rename = "ListQueuesResult")]
    result: ListQueuesResultXml,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ListQueuesResultXml {
    #[serde(rename = "QueueUrl")]
    queue_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "Error")]
    error: ErrorXml,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorXml {
    #[serde(rename = "Type")]
    kind: String,
    code: String,
    message: String,
}
