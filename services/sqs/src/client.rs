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

use http::StatusCode;
use log::warn;
use reqsqs_core::time::{now, DateTime};
use reqsqs_core::{Context, Error, Result};

use crate::action::Action;
use crate::config::ClientConfig;
use crate::dispatch::dispatch;
use crate::response::*;

/// Client sends queue actions with one immutable configuration.
///
/// Every method performs exactly one signed POST. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    config: ClientConfig,
    time: Option<DateTime>,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, config: ClientConfig) -> Self {
        Self {
            ctx,
            config,
            time: None,
        }
    }

    /// The configuration of this client.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Send `message_body` to the configured queue.
    pub async fn send_message(&self, message_body: &str) -> Result<SendMessageResult> {
        self.call(Action::SendMessage {
            message_body: message_body.to_string(),
        })
        .await
    }

    /// Receive at most one message from the configured queue.
    ///
    /// An empty queue yields [`ReceiveOutcome::Empty`]. The body is percent
    /// decoded once, so a literal `%XX` sequence such as `50%25` comes back
    /// unescaped as `50%`.
    pub async fn receive_message(&self) -> Result<ReceiveOutcome> {
        self.call(Action::ReceiveMessage).await
    }

    /// Delete the message identified by `receipt_handle`.
    pub async fn delete_message(&self, receipt_handle: &str) -> Result<BasicResult> {
        self.call(Action::DeleteMessage {
            receipt_handle: receipt_handle.to_string(),
        })
        .await
    }

    /// Create a queue named `queue_name` with the given attributes.
    ///
    /// Attributes are sent as `Attribute.<n>.Name` and `Attribute.<n>.Value`,
    /// numbered from 1 in iteration order.
    pub async fn create_queue<I, K, V>(
        &self,
        queue_name: &str,
        attributes: I,
    ) -> Result<QueueUrlResult>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.call(Action::CreateQueue {
            queue_name: queue_name.to_string(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
        .await
    }

    /// List the queues of the account, optionally filtered by name prefix.
    pub async fn list_queues(&self, queue_name_prefix: Option<&str>) -> Result<QueueListResult> {
        self.call(Action::ListQueues {
            queue_name_prefix: queue_name_prefix.map(|v| v.to_string()),
        })
        .await
    }

    /// Look up the url of the queue named `queue_name`.
    pub async fn get_queue_url(&self, queue_name: &str) -> Result<QueueUrlResult> {
        self.call(Action::GetQueueUrl {
            queue_name: queue_name.to_string(),
        })
        .await
    }

    async fn call<T: DecodeResponse>(&self, action: Action) -> Result<T> {
        action.validate()?;

        let name = action.name();
        let time = self.time.unwrap_or_else(now);
        let resp = dispatch(&self.ctx, &self.config, action.into_request(), time).await?;

        let status = resp.status();
        let body = resp.into_body();
        if !status.is_success() {
            return Err(protocol_error(status, &body).with_context(format!("action: {name}")));
        }

        decode_success(&body).map_err(|e| e.with_context(format!("action: {name}")))
    }
}

fn protocol_error(status: StatusCode, body: &str) -> Error {
    match decode_error(body) {
        Ok(result) => Error::protocol(status, result.to_string()).with_source(result),
        Err(err) => {
            warn!("failed to decode error response with status {status}: {err}");
            Error::protocol(
                status,
                format!("request failed with status {status}, error response could not be decoded"),
            )
            .with_source(err)
            .with_context(format!("response_body: {body}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHttpSend;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use reqsqs_core::ErrorKind;
    use std::collections::BTreeMap;

    const SEND_OK: &str = "<SendMessageResponse><SendMessageResult><MessageId>abc</MessageId><MD5OfMessageBody>xyz</MD5OfMessageBody></SendMessageResult></SendMessageResponse>";
    const INVALID_PARAMETER: &str = "<ErrorResponse><Error><Type>Sender</Type><Code>InvalidParameterValue</Code><Message>bad</Message></Error></ErrorResponse>";

    fn client(http: &RecordingHttpSend) -> Client {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = ClientConfig::new(
            "us-east-1",
            "123456789012",
            "orders",
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
        )
        .expect("config must be valid");
        let time = Utc
            .with_ymd_and_hms(2022, 3, 13, 7, 20, 4)
            .single()
            .expect("time must be valid");

        Client::new(Context::new().with_http_send(http.clone()), config).with_time(time)
    }

    fn sent_params(http: &RecordingHttpSend) -> BTreeMap<String, String> {
        let requests = http.requests();
        let req = requests.last().expect("a request must be sent");
        form_urlencoded::parse(req.body())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[tokio::test]
    async fn test_send_message() -> Result<()> {
        let http = RecordingHttpSend::new(StatusCode::OK, SEND_OK);

        let result = client(&http).send_message("hello world").await?;
        assert_eq!(result.message_id, "abc");
        assert_eq!(result.message_md5_digest, "xyz");

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        let body = std::str::from_utf8(requests[0].body()).expect("body must be utf-8");
        assert!(body.contains("Action=SendMessage"));
        assert!(body.contains("MessageBody=hello%20world"));
        let (_, signature) = body.rsplit_once("&Signature=").expect("signature must be last");
        assert!(!signature.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_actions_are_routed_by_scope() -> Result<()> {
        let http = RecordingHttpSend::new(
            StatusCode::OK,
            "<ListQueuesResponse><ListQueuesResult/></ListQueuesResponse>",
        )
        .then(
            StatusCode::OK,
            "<GetQueueUrlResponse><GetQueueUrlResult><QueueUrl>u</QueueUrl></GetQueueUrlResult></GetQueueUrlResponse>",
        )
        .then(
            StatusCode::OK,
            "<DeleteMessageResponse><ResponseMetadata><RequestId>r</RequestId></ResponseMetadata></DeleteMessageResponse>",
        );
        let client = client(&http);

        client.list_queues(None).await?;
        client.get_queue_url("orders").await?;
        client.delete_message("handle").await?;

        let paths: Vec<String> = http
            .requests()
            .iter()
            .map(|req| req.uri().path().to_string())
            .collect();
        assert_eq!(paths, vec!["/", "/", "/123456789012/orders/"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_queue() -> Result<()> {
        let http = RecordingHttpSend::new(
            StatusCode::OK,
            "<CreateQueueResponse><CreateQueueResult><QueueUrl>https://sqs.us-east-1.amazonaws.com/123456789012/jobs</QueueUrl></CreateQueueResult><ResponseMetadata><RequestId>r</RequestId></ResponseMetadata></CreateQueueResponse>",
        );

        let result = client(&http)
            .create_queue("jobs", [("VisibilityTimeout", "40")])
            .await?;
        assert_eq!(
            result.queue_url,
            "https://sqs.us-east-1.amazonaws.com/123456789012/jobs"
        );

        let params = sent_params(&http);
        assert_eq!(params["Action"], "CreateQueue");
        assert_eq!(params["QueueName"], "jobs");
        assert_eq!(params["Attribute.1.Name"], "VisibilityTimeout");
        assert_eq!(params["Attribute.1.Value"], "40");
        assert!(!params.contains_key("Attribute.2.Name"));
        assert_eq!(
            http.requests()[0].uri().to_string(),
            "https://sqs.us-east-1.amazonaws.com/"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_list_queues_with_prefix() -> Result<()> {
        let http = RecordingHttpSend::new(
            StatusCode::OK,
            "<ListQueuesResponse><ListQueuesResult><QueueUrl>a</QueueUrl><QueueUrl>b</QueueUrl></ListQueuesResult></ListQueuesResponse>",
        );

        let result = client(&http).list_queues(Some("ord")).await?;
        assert_eq!(result.queue_urls, vec!["a", "b"]);
        assert_eq!(sent_params(&http)["QueueNamePrefix"], "ord");
        Ok(())
    }

    #[tokio::test]
    async fn test_receive_then_delete() -> Result<()> {
        let http = RecordingHttpSend::new(
            StatusCode::OK,
            "<ReceiveMessageResponse><ReceiveMessageResult><Message><MessageId>m1</MessageId><ReceiptHandle>h1</ReceiptHandle><MD5OfBody>d1</MD5OfBody><Body>hello%20world</Body></Message></ReceiveMessageResult></ReceiveMessageResponse>",
        )
        .then(
            StatusCode::OK,
            "<DeleteMessageResponse><ResponseMetadata><RequestId>r2</RequestId></ResponseMetadata></DeleteMessageResponse>",
        );
        let client = client(&http);

        let message = client
            .receive_message()
            .await?
            .into_message()
            .expect("message must be received");
        assert_eq!(message.message_body, "hello world");

        let deleted = client.delete_message(&message.receipt_handle).await?;
        assert_eq!(deleted.request_id, "r2");
        assert_eq!(sent_params(&http)["ReceiptHandle"], "h1");
        Ok(())
    }

    #[tokio::test]
    async fn test_receive_from_empty_queue() -> Result<()> {
        let http = RecordingHttpSend::new(
            StatusCode::OK,
            "<ReceiveMessageResponse><ReceiveMessageResult/><ResponseMetadata><RequestId>r1</RequestId></ResponseMetadata></ReceiveMessageResponse>",
        );

        let outcome = client(&http).receive_message().await?;
        assert!(outcome.is_empty());
        assert_eq!(outcome.request_id(), "r1");
        Ok(())
    }

    #[tokio::test]
    async fn test_error_response_is_protocol_error() {
        let http = RecordingHttpSend::new(StatusCode::BAD_REQUEST, INVALID_PARAMETER);

        let err = client(&http)
            .send_message("hello")
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            err.source_as::<ErrorResult>(),
            Some(&ErrorResult {
                kind: "Sender".to_string(),
                code: "InvalidParameterValue".to_string(),
                message: "bad".to_string(),
            })
        );
        assert!(err.context().contains(&"action: SendMessage".to_string()));
    }

    #[tokio::test]
    async fn test_undecodable_error_response_keeps_status() {
        let http = RecordingHttpSend::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable");

        let err = client(&http)
            .receive_message()
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(err.source_as::<ErrorResult>().is_none());
        assert!(err.message().contains("could not be decoded"));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let http = RecordingHttpSend::new(StatusCode::OK, "<SendMessageResponse><SendMessageResult>");

        let err = client(&http)
            .send_message("hello")
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_missing_result_element_is_decode_error() {
        let http = RecordingHttpSend::new(StatusCode::OK, "<GetQueueUrlResponse/>");

        let err = client(&http)
            .get_queue_url("orders")
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_invalid_arguments_send_nothing() {
        let http = RecordingHttpSend::new(StatusCode::OK, "");
        let client = client(&http);

        let err = client.delete_message("").await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        let err = client.get_queue_url("").await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_decode_error() {
        let http = RecordingHttpSend::raw(
            StatusCode::OK,
            b"<ReceiveMessageResponse><ReceiveMessageResult><Message><MessageId>m</MessageId><ReceiptHandle>h</ReceiptHandle><MD5OfBody>d</MD5OfBody><Body>caf\xFF\xFE</Body></Message></ReceiveMessageResult></ReceiveMessageResponse>",
        );

        let err = client(&http)
            .receive_message()
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_malformed_endpoint_fails_signing_and_sends_nothing() {
        let http = RecordingHttpSend::new(StatusCode::OK, SEND_OK);
        let config = ClientConfig::new("us-east-1", "123456789012", "orders", "ak", "sk")
            .expect("config must be valid")
            .with_endpoint("not a url");
        let client = Client::new(Context::new().with_http_send(http.clone()), config);

        let err = client.send_message("hello").await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::SigningFailed);
        let err = client.list_queues(None).await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::SigningFailed);

        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_region_is_rejected_before_sending() {
        let err = ClientConfig::new("us east 1", "123456789012", "orders", "ak", "sk")
            .expect_err("region must be rejected");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_transport_error_is_surfaced() {
        let config = ClientConfig::new("us-east-1", "123456789012", "orders", "ak", "sk")
            .expect("config must be valid");
        let client = Client::new(Context::new(), config);

        let err = client.receive_message().await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
