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

use anyhow::Result;
use log::info;
use reqsqs::sqs::ReceiveOutcome;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // AWS_REGION, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY,
    // REQSQS_ACCOUNT_ID and REQSQS_QUEUE_NAME must be set.
    let client = reqsqs::client_from_env()?;

    if let Some(body) = std::env::args().nth(1) {
        let sent = client.send_message(&body).await?;
        info!("message {} sent", sent.message_id);
    }

    let msg = match client.receive_message().await? {
        ReceiveOutcome::Received(msg) => msg,
        ReceiveOutcome::Empty(_) => {
            println!("No message to dequeue.");
            return Ok(());
        }
    };
    println!("{} received.", msg.message_id);
    println!("{}", msg.message_body);

    client.delete_message(&msg.receipt_handle).await?;
    println!("Successfully received and deleted.");

    Ok(())
}
