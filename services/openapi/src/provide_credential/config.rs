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
use std::sync::Arc;
use zaoshu_core::{Context, ProvideCredential, Result};

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider loads credential from [`Config`], filling
/// missing fields from env.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new provider via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);

        match (config.api_key, config.api_secret) {
            (Some(key), Some(secret)) => Credential::new(key, secret).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use std::collections::HashMap;
    use zaoshu_core::StaticEnv;

    #[tokio::test]
    async fn test_config_credential_provider() -> Result<()> {
        let config = Config::new()
            .with_api_key("config_key")
            .with_api_secret("config_secret");
        let provider = ConfigCredentialProvider::new(Arc::new(config));

        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be loaded");
        assert_eq!("config_key", cred.api_key());
        assert_eq!("config_secret", cred.api_secret());
        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_fills_from_env() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([(ZAOSHU_API_SECRET.to_string(), "env_secret".to_string())]),
        });
        let provider =
            ConfigCredentialProvider::new(Arc::new(Config::new().with_api_key("config_key")));

        let cred = provider
            .provide_credential(&ctx)
            .await?
            .expect("credential must be loaded");
        assert_eq!("config_key", cred.api_key());
        assert_eq!("env_secret", cred.api_secret());
        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_incomplete() -> Result<()> {
        let provider =
            ConfigCredentialProvider::new(Arc::new(Config::new().with_api_key("config_key")));
        assert!(provider.provide_credential(&Context::new()).await?.is_none());
        Ok(())
    }
}
