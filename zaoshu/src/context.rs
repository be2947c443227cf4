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

use log::debug;
use zaoshu_core::utils::Redact;
use zaoshu_core::{Context, OsEnv, Result};
use zaoshu_http_send_reqwest::ReqwestHttpSend;
use zaoshu_openapi::{Client, Config, DefaultCredentialProvider, Transport};

/// Create a context with a default reqwest client and the process env.
///
/// Use [`Context::with_http_send`] with a customized
/// [`ReqwestHttpSend::new`] to set timeouts or proxies.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Create a client configured from env.
///
/// The credential is resolved once from `ZAOSHU_API_KEY` and
/// `ZAOSHU_API_SECRET`; `ZAOSHU_BASE_URL` overrides the base url.
/// Returns a config invalid error if no credential is found.
pub async fn default_client() -> Result<Client> {
    let ctx = default_context();
    let config = Config::new().from_env(&ctx);

    let transport = Transport::from_provider(ctx, DefaultCredentialProvider::new()).await?;
    let client = Client::from_transport(transport).with_base_url(config.base_url());
    debug!(
        "created zaoshu client for {:?} against {}",
        Redact::from(client.api_key()),
        client.base_url()
    );
    Ok(client)
}
