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

use crate::{Context, ProvideCredential, Result};
use async_trait::async_trait;
use std::fmt::{self, Debug};

/// A chain of credential providers that will be tried in order.
///
/// The first provider returning a credential wins. Providers that return an
/// error are logged and skipped.
pub struct ProvideCredentialChain<C: Send + Sync + Unpin + 'static> {
    providers: Vec<Box<dyn ProvideCredential<Credential = C>>>,
}

impl<C: Send + Sync + Unpin + 'static> ProvideCredentialChain<C> {
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = C> + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Create a credential provider chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideCredential<Credential = C>>>) -> Self {
        Self { providers }
    }

    /// Number of providers in this chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the chain has no provider.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<C: Send + Sync + Unpin + 'static> Default for ProvideCredentialChain<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Send + Sync + Unpin + 'static> Debug for ProvideCredentialChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers", &self.providers)
            .finish()
    }
}

#[async_trait]
impl<C: Send + Sync + Unpin + 'static> ProvideCredential for ProvideCredentialChain<C> {
    type Credential = C;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            log::debug!("trying credential provider: {provider:?}");

            match provider.provide_credential(ctx).await {
                Ok(Some(cred)) => {
                    log::debug!("loaded credential from provider: {provider:?}");
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    log::debug!("no credential found in provider: {provider:?}");
                    continue;
                }
                Err(e) => {
                    log::warn!("error loading credential from provider {provider:?}: {e:?}");
                    continue;
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    enum Outcome {
        Found(&'static str),
        Missing,
        Failed,
    }

    #[derive(Debug)]
    struct MockProvider {
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    impl MockProvider {
        fn new(outcome: Outcome) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    outcome,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl ProvideCredential for MockProvider {
        type Credential = String;

        async fn provide_credential(&self, _: &Context) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Found(v) => Ok(Some(v.to_string())),
                Outcome::Missing => Ok(None),
                Outcome::Failed => Err(Error::unexpected("provider failed")),
            }
        }
    }

    #[tokio::test]
    async fn test_chain_stops_at_first_success() {
        let _ = env_logger::builder().is_test(true).try_init();

        let (p1, c1) = MockProvider::new(Outcome::Missing);
        let (p2, c2) = MockProvider::new(Outcome::Failed);
        let (p3, c3) = MockProvider::new(Outcome::Found("third"));
        let (p4, c4) = MockProvider::new(Outcome::Found("fourth"));

        let chain = ProvideCredentialChain::new()
            .push(p1)
            .push(p2)
            .push(p3)
            .push(p4);
        assert_eq!(chain.len(), 4);

        let cred = chain
            .provide_credential(&Context::new())
            .await
            .expect("chain must not fail");
        assert_eq!(cred.as_deref(), Some("third"));

        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert_eq!(c3.load(Ordering::SeqCst), 1);
        assert_eq!(c4.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chain_exhausted() {
        let (p1, _) = MockProvider::new(Outcome::Failed);
        let providers: Vec<Box<dyn ProvideCredential<Credential = String>>> = vec![Box::new(p1)];
        let chain = ProvideCredentialChain::from_vec(providers);

        let cred = chain
            .provide_credential(&Context::new())
            .await
            .expect("chain must not fail");
        assert!(cred.is_none());
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let chain = ProvideCredentialChain::<String>::default();
        assert!(chain.is_empty());

        let cred = chain
            .provide_credential(&Context::new())
            .await
            .expect("chain must not fail");
        assert!(cred.is_none());
    }
}
