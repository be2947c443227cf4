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

use crate::Credential;
use async_trait::async_trait;
use zaoshu_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed api key and secret.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider from an api key and secret.
    ///
    /// Returns a config invalid error if either part is empty.
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self> {
        Ok(Self {
            credential: Credential::new(api_key, api_secret)?,
        })
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zaoshu_core::ErrorKind;

    #[tokio::test]
    async fn test_static_credential_provider() -> Result<()> {
        let provider = StaticCredentialProvider::new("test_api_key", "test_api_secret")?;
        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("static provider must return credential");

        assert_eq!("test_api_key", cred.api_key());
        assert_eq!("test_api_secret", cred.api_secret());
        Ok(())
    }

    #[test]
    fn test_static_credential_provider_fails_fast() {
        let err = StaticCredentialProvider::new("", "").unwrap_err();
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
    }
}
