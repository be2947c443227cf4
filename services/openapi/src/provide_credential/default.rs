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

use async_trait::async_trait;
use zaoshu_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::credential::Credential;
use crate::provide_credential::EnvCredentialProvider;

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zaoshu_openapi::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// # fn main() -> zaoshu_core::Result<()> {
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new("api_key", "api_secret")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::provide_credential::StaticCredentialProvider;
    use std::collections::HashMap;
    use zaoshu_core::StaticEnv;

    #[tokio::test]
    async fn test_default_provider_without_env() -> Result<()> {
        let ctx = Context::new().with_env(StaticEnv::default());

        let cred = DefaultCredentialProvider::new().provide_credential(&ctx).await?;
        assert!(cred.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_default_provider_with_env() -> Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (ZAOSHU_API_KEY.to_string(), "env_key".to_string()),
                (ZAOSHU_API_SECRET.to_string(), "env_secret".to_string()),
            ]),
        });

        let cred = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .expect("credential must be loaded");
        assert_eq!("env_key", cred.api_key());
        Ok(())
    }

    #[tokio::test]
    async fn test_default_provider_push_front() -> Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (ZAOSHU_API_KEY.to_string(), "env_key".to_string()),
                (ZAOSHU_API_SECRET.to_string(), "env_secret".to_string()),
            ]),
        });

        let cred = DefaultCredentialProvider::new()
            .push_front(StaticCredentialProvider::new("static_key", "static_secret")?)
            .provide_credential(&ctx)
            .await?
            .expect("credential must be loaded");
        assert_eq!("static_key", cred.api_key());
        Ok(())
    }
}
