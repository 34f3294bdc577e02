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

use volcsign_core::{Context, OsEnv};
use volcsign_http_send_reqwest::ReqwestHttpSend;

/// Create a context reading the process env and sending requests with a default [`reqwest::Client`].
pub fn default_context() -> Context {
    default_context_with_client(reqwest::Client::new())
}

/// Create a context reading the process env and sending requests with the given client.
///
/// Configure timeouts on the client, they bound the network portion of a call.
pub fn default_context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::new(client))
}
