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

mod live;
mod standard;

use std::env;

use chrono::TimeZone;
use chrono::Utc;
use volcsign_core::time::DateTime;
use volcsign_core::Context;
use volcsign_http_send_reqwest::ReqwestHttpSend;
use volcsign_volcengine::{Config, Credential, RequestSigner};

/// The fixed signing time all offline fixtures are computed at.
pub fn fixture_time() -> DateTime {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 15)
        .single()
        .expect("time must be valid")
}

/// Signer for `ark` in `cn-beijing` at the fixture time.
pub fn fixture_signer() -> RequestSigner {
    RequestSigner::from_config(&Config::new()).with_time(fixture_time())
}

pub fn fixture_credential() -> Credential {
    Credential::new("AKTEST", "secret").expect("credential must be valid")
}

/// Initialize live test environment
///
/// Returns `None` unless `VOLCSIGN_VOLCENGINE_TEST` is `on`.
pub fn init_live_test() -> Option<(Context, Config)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("VOLCSIGN_VOLCENGINE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("client must be valid");
    let ctx = Context::new()
        .with_env(volcsign_core::OsEnv)
        .with_http_send(ReqwestHttpSend::new(client));
    let config = Config::new().from_env(&ctx);

    Some((ctx, config))
}
