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

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use volcsign_core::{utils::Redact, Context};

/// Config carries all the configuration for Volcengine OpenAPI services.
///
/// Region, service and host are fixed per deployment, callers never pass them per request.
#[derive(Clone)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_ACCESSKEY`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_SECRETKEY`]
    pub secret_access_key: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's set explicitly
    /// - env value: [`VOLC_REGION`]
    /// - default: `cn-beijing`
    pub region: String,
    /// Service name bound into the credential scope, `ark` by default.
    pub service: String,
    /// `host` will be loaded from
    ///
    /// - this field if it's set explicitly
    /// - env value: [`VOLC_HOST`]
    /// - default: `open.volcengineapi.com`
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default deployment scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key_id
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_access_key
    pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set service
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Load config from env.
    ///
    /// Values already set on this config take precedence. Region and host are
    /// only overridden while they still hold their defaults.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(VOLC_ACCESSKEY) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VOLC_SECRETKEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VOLC_REGION) {
            if self.region == DEFAULT_REGION {
                self.region = v;
            }
        }
        if let Some(v) = ctx.env_var(VOLC_HOST) {
            if self.host == DEFAULT_HOST {
                self.host = v;
            }
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("service", &self.service)
            .field("host", &self.host)
            .finish()
    }
}
