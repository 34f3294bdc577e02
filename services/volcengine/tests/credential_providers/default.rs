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

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use volcsign_core::{
    Context, ErrorKind, ProvideCredential, ProvideCredentialChain, Result, Signer, StaticEnv,
};
use volcsign_volcengine::constants::{VOLC_ACCESSKEY, VOLC_SECRETKEY};
use volcsign_volcengine::{
    Config, DefaultCredentialProvider, EnvCredentialProvider, RequestSigner,
    StaticCredentialProvider,
};

fn ctx(envs: &[(&str, &str)]) -> Context {
    Context::new().with_env(StaticEnv {
        envs: envs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    })
}

#[tokio::test]
async fn test_partial_config_falls_back_to_env() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config::new().with_access_key_id("config_access_key");
    let cred = DefaultCredentialProvider::new(config)
        .provide_credential(&ctx(&[
            (VOLC_ACCESSKEY, "env_access_key"),
            (VOLC_SECRETKEY, "env_secret_key"),
        ]))
        .await?
        .expect("credential must be found");

    assert_eq!(cred.access_key_id, "env_access_key");
    assert_eq!(cred.secret_access_key, "env_secret_key");
    Ok(())
}

#[tokio::test]
async fn test_custom_chain_order() -> Result<()> {
    let chain = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(StaticCredentialProvider::new("static_access_key", "static_secret_key")?);
    let provider = DefaultCredentialProvider::with_chain(chain);

    let cred = provider
        .provide_credential(&ctx(&[]))
        .await?
        .expect("credential must be found");
    assert_eq!(cred.access_key_id, "static_access_key");

    let cred = provider
        .provide_credential(&ctx(&[
            (VOLC_ACCESSKEY, "env_access_key"),
            (VOLC_SECRETKEY, "env_secret_key"),
        ]))
        .await?
        .expect("credential must be found");
    assert_eq!(cred.access_key_id, "env_access_key");
    Ok(())
}

#[tokio::test]
async fn test_signer_load_with_empty_secret() {
    let ctx = ctx(&[(VOLC_ACCESSKEY, "env_access_key"), (VOLC_SECRETKEY, "")]);
    let config = Config::new().from_env(&ctx);

    let err = Signer::load(
        ctx,
        DefaultCredentialProvider::new(config.clone()),
        RequestSigner::from_config(&config),
    )
    .await
    .expect_err("empty secret must fail at construction");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[tokio::test]
async fn test_signer_load_from_env() -> Result<()> {
    let ctx = ctx(&[
        (VOLC_ACCESSKEY, "env_access_key"),
        (VOLC_SECRETKEY, "env_secret_key"),
        ("VOLC_REGION", "cn-shanghai"),
    ]);
    let config = Config::new().from_env(&ctx);

    let signer = Signer::load(
        ctx,
        DefaultCredentialProvider::new(config.clone()),
        RequestSigner::from_config(&config),
    )
    .await?;

    assert_eq!(signer.credential().access_key_id, "env_access_key");
    assert_eq!(config.region, "cn-shanghai");
    Ok(())
}
