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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used to build a config.
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const REQSQS_ACCOUNT_ID: &str = "REQSQS_ACCOUNT_ID";
pub const REQSQS_QUEUE_NAME: &str = "REQSQS_QUEUE_NAME";
pub const REQSQS_ENDPOINT: &str = "REQSQS_ENDPOINT";

// Protocol values.
pub const API_VERSION: &str = "2012-11-05";
pub const SIGNATURE_VERSION: &str = "2";
pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Common wire parameters.
pub const PARAM_ACTION: &str = "Action";
pub const PARAM_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const PARAM_SIGNATURE_VERSION: &str = "SignatureVersion";
pub const PARAM_SIGNATURE_METHOD: &str = "SignatureMethod";
pub const PARAM_VERSION: &str = "Version";
pub const PARAM_TIMESTAMP: &str = "Timestamp";
pub const PARAM_SIGNATURE: &str = "Signature";

// Action specific wire parameters.
pub const PARAM_MESSAGE_BODY: &str = "MessageBody";
pub const PARAM_RECEIPT_HANDLE: &str = "ReceiptHandle";
pub const PARAM_QUEUE_NAME: &str = "QueueName";
pub const PARAM_QUEUE_NAME_PREFIX: &str = "QueueNamePrefix";

/// AsciiSet for the query protocol, RFC 3986 percent encoding.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space is `%20`, never `+`.
pub static SQS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
