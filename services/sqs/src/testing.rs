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

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use reqsqs_core::{HttpSend, Result};

/// HttpSend that records every request and replays canned responses.
///
/// Responses are served in order, the last one is repeated once the queue
/// runs dry.
#[derive(Debug, Clone)]
pub struct RecordingHttpSend {
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    responses: Arc<Mutex<VecDeque<(StatusCode, Bytes)>>>,
}

impl RecordingHttpSend {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self::raw(status, body.as_bytes())
    }

    /// Reply with bytes that don't have to be valid utf-8.
    pub fn raw(status: StatusCode, body: &[u8]) -> Self {
        Self {
            requests: Arc::default(),
            responses: Arc::new(Mutex::new(VecDeque::from([(
                status,
                Bytes::copy_from_slice(body),
            )]))),
        }
    }

    /// Queue another response after the existing ones.
    pub fn then(self, status: StatusCode, body: &str) -> Self {
        self.responses
            .lock()
            .expect("lock must not be poisoned")
            .push_back((status, Bytes::copy_from_slice(body.as_bytes())));
        self
    }

    /// Copies of every request sent so far.
    pub fn requests(&self) -> Vec<http::Request<Bytes>> {
        self.requests
            .lock()
            .expect("lock must not be poisoned")
            .iter()
            .map(|req| {
                let mut copy = http::Request::new(req.body().clone());
                *copy.method_mut() = req.method().clone();
                *copy.uri_mut() = req.uri().clone();
                *copy.headers_mut() = req.headers().clone();
                copy
            })
            .collect()
    }
}

#[async_trait]
impl HttpSend for RecordingHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests
            .lock()
            .expect("lock must not be poisoned")
            .push(req);

        let (status, body) = {
            let mut responses = self.responses.lock().expect("lock must not be poisoned");
            if responses.len() > 1 {
                responses.pop_front().expect("queue must not be empty")
            } else {
                responses.front().cloned().expect("queue must not be empty")
            }
        };

        let mut resp = http::Response::new(body);
        *resp.status_mut() = status;
        Ok(resp)
    }
}
