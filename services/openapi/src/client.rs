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

use std::sync::Arc;

use zaoshu_core::{Context, Result};

use crate::config::Config;
use crate::constants::DEFAULT_BASE_URL;
use crate::credential::Credential;
use crate::instance::Instance;
use crate::provide_credential::ConfigCredentialProvider;
use crate::transport::Transport;
use crate::user::User;

/// Client is the entry of the zaoshu open api.
///
/// It owns a [`Transport`] and the base url, resources borrow both:
///
/// ```no_run
/// use zaoshu_core::{Context, Result};
/// use zaoshu_openapi::{Client, Credential};
///
/// # async fn example(ctx: Context) -> Result<()> {
/// let client = Client::new(ctx, Credential::new("api_key", "api_secret")?);
/// let resp = client.user().wallet().await?;
/// println!("{}", String::from_utf8_lossy(resp.body()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
    base_url: String,
}

impl Client {
    /// Create a new client against [`DEFAULT_BASE_URL`].
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self::from_transport(Transport::new(ctx, credential))
    }

    /// Create a new client from an existing transport.
    pub fn from_transport(transport: Transport) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client from config, filling missing fields from env.
    ///
    /// Returns a config invalid error if no complete credential is found.
    pub async fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let base_url = config.base_url().to_string();

        let provider = ConfigCredentialProvider::new(Arc::new(config));
        let transport = Transport::from_provider(ctx, provider).await?;
        Ok(Self::from_transport(transport).with_base_url(base_url))
    }

    /// Set the base url.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The api key of this client.
    pub fn api_key(&self) -> &str {
        self.transport.api_key()
    }

    /// The base url of this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Instance apis.
    pub fn instance(&self) -> Instance<'_> {
        Instance::new(&self.transport, &self.base_url)
    }

    /// User apis.
    pub fn user(&self) -> User<'_> {
        User::new(&self.transport, &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use std::collections::HashMap;
    use zaoshu_core::{ErrorKind, StaticEnv};

    fn env_ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_client_new() -> Result<()> {
        let client = Client::new(Context::new(), Credential::new("key", "secret")?);
        assert_eq!("key", client.api_key());
        assert_eq!(DEFAULT_BASE_URL, client.base_url());

        let client = client.with_base_url("http://127.0.0.1:9900/v2");
        assert_eq!("http://127.0.0.1:9900/v2", client.base_url());
        Ok(())
    }

    #[tokio::test]
    async fn test_client_from_config() -> Result<()> {
        let ctx = env_ctx(&[
            (ZAOSHU_API_SECRET, "env_secret"),
            (ZAOSHU_BASE_URL, "http://127.0.0.1:9900/v2"),
        ]);

        let client = Client::from_config(ctx, Config::new().with_api_key("config_key")).await?;
        assert_eq!("config_key", client.api_key());
        assert_eq!("http://127.0.0.1:9900/v2", client.base_url());
        Ok(())
    }

    #[tokio::test]
    async fn test_client_from_config_without_credential() {
        let err = Client::from_config(Context::new(), Config::new().with_api_key("key"))
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
    }

    #[tokio::test]
    async fn test_client_from_config_error_hides_secret() {
        let secret = "80518755f8d5d91f730a9332e2941023e41e29a856e6285bf51901af2f50f2b0";
        let err = Client::from_config(Context::new(), Config::new().with_api_secret(secret))
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
        assert!(!err.to_string().contains("805"));
        assert!(!err.to_string().contains("2b0"));
    }

    #[test]
    fn test_client_debug_hides_secret() -> Result<()> {
        let client = Client::new(
            Context::new(),
            Credential::new("ca3a56bdb5594c2b9e6d3f87f3d35baf", "a-very-private-secret")?,
        );
        assert!(!format!("{client:?}").contains("a-very-private-secret"));
        Ok(())
    }
}
