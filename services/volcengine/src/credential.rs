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

use volcsign_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential that holds the access key id and the secret access key.
///
/// The secret is only ever used as the first key of the signing key ladder,
/// it is never transmitted nor logged.
#[derive(Clone)]
pub struct Credential {
    /// Access key id for volcengine services.
    pub access_key_id: String,
    /// Secret access key for volcengine services.
    pub secret_access_key: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// Returns a [`ConfigInvalid`](volcsign_core::ErrorKind::ConfigInvalid) error
    /// if either value is empty.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Result<Self> {
        let cred = Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        };

        if cred.access_key_id.is_empty() {
            return Err(Error::config_invalid("access key id is empty"));
        }
        if cred.secret_access_key.is_empty() {
            return Err(Error::config_invalid("secret access key is empty"));
        }

        Ok(cred)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}
