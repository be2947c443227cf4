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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use log::warn;
use zaoshu_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads zaoshu credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `ZAOSHU_API_KEY`: The api key
/// - `ZAOSHU_API_SECRET`: The api secret
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match (ctx.env_var(ZAOSHU_API_KEY), ctx.env_var(ZAOSHU_API_SECRET)) {
            (Some(key), Some(secret)) => Credential::new(key, secret).map(Some),
            (Some(_), None) => {
                warn!("{ZAOSHU_API_KEY} is set but {ZAOSHU_API_SECRET} is missing");
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}
