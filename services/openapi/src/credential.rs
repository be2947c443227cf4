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

use zaoshu_core::utils::Redact;
use zaoshu_core::{Error, Result, SigningCredential};

/// Credential for the zaoshu open api.
///
/// `api_key` travels in the `Authorization` header, `api_secret` is only ever
/// used as HMAC key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    api_key: String,
    api_secret: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// Returns a config invalid error if either part is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let cred = Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        };

        if cred.api_key.is_empty() {
            return Err(Error::config_invalid("api_key must not be empty"));
        }
        if cred.api_secret.is_empty() {
            return Err(Error::config_invalid("api_secret must not be empty"));
        }
        Ok(cred)
    }

    /// The api key sent along with every request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The api secret used to sign requests.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("api_secret", &Redact::from(&self.api_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zaoshu_core::ErrorKind;

    #[test]
    fn test_credential_new() -> Result<()> {
        let cred = Credential::new("key", "secret")?;
        assert_eq!("key", cred.api_key());
        assert_eq!("secret", cred.api_secret());
        assert!(cred.is_valid());
        Ok(())
    }

    #[test]
    fn test_credential_rejects_empty() {
        let err = Credential::new("", "secret").unwrap_err();
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());

        let err = Credential::new("key", "").unwrap_err();
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_credential_debug_redacts_secret() -> Result<()> {
        let cred = Credential::new(
            "ca3a56bdb5594c2b9e6d3f87f3d35baf",
            "80518755f8d5d91f730a9332e2941023e41e29a856e6285bf51901af2f50f2b0",
        )?;
        let s = format!("{cred:?}");
        assert!(!s.contains("80518755f8d5d91f730a9332e2941023"));
        assert_eq!(
            r#"Credential { api_key: ca3***baf, api_secret: 805***2b0 }"#,
            s
        );
        Ok(())
    }
}
