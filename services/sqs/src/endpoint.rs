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

use percent_encoding::utf8_percent_encode;

use crate::constants::SQS_QUERY_ENCODE_SET;

/// Which endpoint an action must be sent to.
///
/// Sending an account scoped action to a queue endpoint is rejected by the
/// service, so every action carries its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// `https://sqs.<region>.amazonaws.com/<account_id>/<queue_name>/`
    Queue,
    /// `https://sqs.<region>.amazonaws.com/`
    Account,
}

/// Get the service host of a region: `sqs.{region}.amazonaws.com`
pub fn service_host(region: &str) -> String {
    format!("sqs.{region}.amazonaws.com")
}

/// Get the base url of a region: `https://sqs.{region}.amazonaws.com`
pub fn region_base_url(region: &str) -> String {
    format!("https://{}", service_host(region))
}

/// Get the account scoped endpoint, used by CreateQueue, ListQueues and GetQueueUrl.
pub fn account_endpoint(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Get the queue scoped endpoint, used by SendMessage, ReceiveMessage and DeleteMessage.
///
/// Account id and queue name are percent encoded as path segments.
pub fn queue_endpoint(base_url: &str, account_id: &str, queue_name: &str) -> String {
    format!(
        "{}/{}/{}/",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(account_id, &SQS_QUERY_ENCODE_SET),
        utf8_percent_encode(queue_name, &SQS_QUERY_ENCODE_SET),
    )
}
