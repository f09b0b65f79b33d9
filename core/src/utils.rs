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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret so it can be printed in `Debug` output and logs.
///
/// - Empty input prints `EMPTY`.
/// - Input shorter than 12 characters is fully hidden behind `***`.
/// - Longer input keeps only its first and last three characters, which is
///   enough to tell two access keys apart.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            return f.write_str("EMPTY");
        }
        if length < 12 || !self.0.is_char_boundary(3) || !self.0.is_char_boundary(length - 3) {
            return f.write_str("***");
        }

        f.write_str(&self.0[..3])?;
        f.write_str("***")?;
        f.write_str(&self.0[length - 3..])
    }
}
