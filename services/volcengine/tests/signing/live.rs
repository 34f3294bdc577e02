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

use log::debug;
use log::warn;
use volcsign_core::{Result, Signer};
use volcsign_volcengine::{list_models, DefaultCredentialProvider, RequestSigner};

use super::init_live_test;

#[tokio::test]
async fn test_list_models() -> Result<()> {
    let Some((ctx, config)) = init_live_test() else {
        warn!("VOLCSIGN_VOLCENGINE_TEST is not set, skipped");
        return Ok(());
    };

    let signer = Signer::load(
        ctx,
        DefaultCredentialProvider::new(config.clone()),
        RequestSigner::from_config(&config),
    )
    .await?;

    let models = list_models(&signer, &config.host).await?;
    debug!("got models: {models:?}");

    for model in models {
        assert!(model.id.starts_with("ep-"), "unexpected endpoint id {}", model.id);
        assert!(model.model.contains('/'));
    }
    Ok(())
}
