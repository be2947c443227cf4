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
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zaoshu_core::{Context, ProvideCredential, ProvideCredentialChain, StaticEnv};
use zaoshu_openapi::{
    Config, ConfigCredentialProvider, Credential, DefaultCredentialProvider,
    EnvCredentialProvider, StaticCredentialProvider, Transport,
};

#[derive(Debug)]
struct CountingProvider {
    name: String,
    return_credential: bool,
    call_count: Arc<Mutex<usize>>,
}

#[async_trait]
impl ProvideCredential for CountingProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> zaoshu_core::Result<Option<Self::Credential>> {
        *self.call_count.lock().unwrap() += 1;

        if self.return_credential {
            Credential::new(format!("{}_key", self.name), format!("{}_secret", self.name)).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn env_ctx(envs: &[(&str, &str)]) -> Context {
    Context::new().with_env(StaticEnv {
        envs: envs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    })
}

#[tokio::test]
async fn test_chain_stops_at_first_success() {
    let ctx = Context::new();

    let count1 = Arc::new(Mutex::new(0));
    let count2 = Arc::new(Mutex::new(0));
    let count3 = Arc::new(Mutex::new(0));

    let chain = ProvideCredentialChain::new()
        .push(CountingProvider {
            name: "provider1".to_string(),
            return_credential: false,
            call_count: count1.clone(),
        })
        .push(CountingProvider {
            name: "provider2".to_string(),
            return_credential: true,
            call_count: count2.clone(),
        })
        .push(CountingProvider {
            name: "provider3".to_string(),
            return_credential: true,
            call_count: count3.clone(),
        });

    let cred = chain
        .provide_credential(&ctx)
        .await
        .unwrap()
        .expect("credential must be loaded");
    assert_eq!("provider2_key", cred.api_key());
    assert_eq!("provider2_secret", cred.api_secret());

    assert_eq!(1, *count1.lock().unwrap());
    assert_eq!(1, *count2.lock().unwrap());
    assert_eq!(0, *count3.lock().unwrap());
}

#[tokio::test]
async fn test_chain_with_real_providers() {
    let ctx = env_ctx(&[
        ("ZAOSHU_API_KEY", "env_key"),
        ("ZAOSHU_API_SECRET", "env_secret"),
    ]);

    let chain = ProvideCredentialChain::new()
        .push(ConfigCredentialProvider::new(Arc::new(Config::default())))
        .push(StaticCredentialProvider::new("static_key", "static_secret").unwrap());

    // Config falls back to env, so the static provider is never reached.
    let cred = chain.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!("env_key", cred.api_key());
}

#[tokio::test]
async fn test_empty_chain_returns_none() {
    let chain: ProvideCredentialChain<Credential> = ProvideCredentialChain::new();

    let result = chain.provide_credential(&Context::new()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_default_provider_with_static_override() {
    let ctx = env_ctx(&[
        ("ZAOSHU_API_KEY", "env_key"),
        ("ZAOSHU_API_SECRET", "env_secret"),
    ]);

    let provider = DefaultCredentialProvider::new();
    let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!("env_key", cred.api_key());

    let provider = DefaultCredentialProvider::new()
        .push_front(StaticCredentialProvider::new("static_key", "static_secret").unwrap());
    let cred = provider.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!("static_key", cred.api_key());
}

#[tokio::test]
async fn test_transport_fails_fast_without_credential() {
    let ctx = env_ctx(&[("ZAOSHU_API_KEY", "env_key")]);

    let err = Transport::from_provider(ctx, EnvCredentialProvider::new())
        .await
        .unwrap_err();
    assert_eq!(zaoshu_core::ErrorKind::ConfigInvalid, err.kind());
}

#[tokio::test]
async fn test_transport_rejects_empty_env_secret() {
    let ctx = env_ctx(&[("ZAOSHU_API_KEY", "env_key"), ("ZAOSHU_API_SECRET", "")]);

    let err = Transport::from_provider(ctx, DefaultCredentialProvider::new())
        .await
        .unwrap_err();
    assert_eq!(zaoshu_core::ErrorKind::ConfigInvalid, err.kind());
}
