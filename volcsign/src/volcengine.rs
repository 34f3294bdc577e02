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

//! Volcengine OpenAPI signing.

pub use volcsign_volcengine::*;

use volcsign_core::{Context, Result, Signer};

/// Signer for Volcengine OpenAPI requests.
pub type DefaultSigner = Signer<Credential>;

/// Load a signer for the deployment described by `config`.
///
/// The credential is resolved through [`DefaultCredentialProvider`] once, a
/// missing or empty credential fails here instead of at signing time.
pub async fn default_signer(ctx: Context, config: &Config) -> Result<DefaultSigner> {
    Signer::load(
        ctx,
        DefaultCredentialProvider::new(config.clone()),
        RequestSigner::from_config(config),
    )
    .await
}
