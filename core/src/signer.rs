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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is resolved once when the signer is constructed and never
/// changes afterwards. A signer can't exist without a valid credential, so
/// every call to [`Signer::sign`] has one to sign with.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<K>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer by loading the credential from the given provider.
    ///
    /// Returns a [`ConfigInvalid`](crate::ErrorKind::ConfigInvalid) error if the
    /// provider has no credential or the credential is not valid.
    pub async fn load(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        let credential = provider.provide_credential(&ctx).await?.ok_or_else(|| {
            Error::config_invalid(format!("no credential found by provider {provider:?}"))
        })?;

        Self::with_credential(ctx, credential, builder)
    }

    /// Create a new signer with an already resolved credential.
    pub fn with_credential(
        ctx: Context,
        credential: K,
        builder: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::config_invalid(format!(
                "credential is not valid: {credential:?}"
            )));
        }

        Ok(Self {
            ctx,
            builder: Arc::new(builder),
            credential: Arc::new(credential),
        })
    }

    /// Get the context bound to this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Get the credential bound to this signer.
    pub fn credential(&self) -> &K {
        &self.credential
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        self.builder
            .sign_request(&self.ctx, req, Some(self.credential.as_ref()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use async_trait::async_trait;
    use http::HeaderValue;

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct TestProvider(Option<&'static str>);

    #[async_trait]
    impl ProvideCredential for TestProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<TestCredential>> {
            Ok(self.0.map(|v| TestCredential(v.to_string())))
        }
    }

    #[derive(Debug)]
    struct TestRequestSigner;

    #[async_trait]
    impl SignRequest for TestRequestSigner {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            credential: Option<&TestCredential>,
        ) -> Result<()> {
            let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
            req.headers
                .insert("x-test-credential", HeaderValue::from_str(&cred.0)?);
            Ok(())
        }
    }

    fn test_parts() -> http::request::Parts {
        http::Request::builder()
            .method("POST")
            .uri("https://example.com/")
            .body(())
            .expect("request must be valid")
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_load_and_sign() -> Result<()> {
        let signer =
            Signer::load(Context::new(), TestProvider(Some("key")), TestRequestSigner).await?;
        assert_eq!(signer.credential().0, "key");

        let mut parts = test_parts();
        signer.sign(&mut parts).await?;
        assert_eq!(parts.headers["x-test-credential"], "key");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_without_credential() {
        let err = Signer::load(Context::new(), TestProvider(None), TestRequestSigner)
            .await
            .expect_err("must fail without credential");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_with_invalid_credential() {
        let err = Signer::with_credential(
            Context::new(),
            TestCredential(String::new()),
            TestRequestSigner,
        )
        .expect_err("must fail with invalid credential");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
