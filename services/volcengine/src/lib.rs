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

//! Volcengine OpenAPI service signer
//!
//! Signs requests with the `HMAC-SHA256` scheme used by `open.volcengineapi.com`.
//!
//! ```no_run
//! use volcsign_core::{Context, Result, Signer};
//! use volcsign_volcengine::{list_models, Config, DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example(ctx: Context) -> Result<()> {
//! let config = Config::new().from_env(&ctx);
//! let signer = Signer::load(
//!     ctx,
//!     DefaultCredentialProvider::new(config.clone()),
//!     RequestSigner::from_config(&config),
//! )
//! .await?;
//!
//! for model in list_models(&signer, &config.host).await? {
//!     println!("{}: {}", model.id, model.model);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod signable_request;
pub use signable_request::SignableRequest;

mod sign_request;
pub use sign_request::normalize_query;
pub use sign_request::CanonicalRequest;
pub use sign_request::RequestSigner;
pub use sign_request::SignedHeaders;
pub use sign_request::SigningKey;

mod endpoint;
pub use endpoint::list_endpoints;
pub use endpoint::list_endpoints_request;
pub use endpoint::list_models;
pub use endpoint::Endpoint;
pub use endpoint::FoundationModel;
pub use endpoint::ModelInfo;
pub use endpoint::ModelReference;

pub mod constants;
