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

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, Request, Response, Uri};
use log::debug;
use zaoshu_core::{Context, Error, ProvideCredential, Result, SignRequest};

use crate::constants::{CONTENT_TYPE_JSON, ZAOSHU_API_KEY, ZAOSHU_API_SECRET};
use crate::credential::Credential;
use crate::sign_request::RequestSigner;

/// Transport signs and sends requests to the open api.
///
/// Every call gets its own `Date` and signature, nothing is shared between
/// calls except the immutable credential, so a `Transport` can be used from
/// many tasks at once.
///
/// Responses are returned untouched: non-2xx statuses are not errors here,
/// and nothing is retried.
#[derive(Debug, Clone)]
pub struct Transport {
    ctx: Context,
    credential: Credential,
    signer: RequestSigner,
}

impl Transport {
    /// Create a new transport with given credential.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            credential,
            signer: RequestSigner::new(),
        }
    }

    /// Create a new transport by resolving the credential once, right now.
    ///
    /// Returns a config invalid error if the provider has no credential.
    pub async fn from_provider(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let credential = provider.provide_credential(&ctx).await?.ok_or_else(|| {
            Error::config_invalid(format!(
                "no credential found, set both {ZAOSHU_API_KEY} and {ZAOSHU_API_SECRET}"
            ))
        })?;

        Ok(Self::new(ctx, credential))
    }

    /// Replace the request signer.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// The api key this transport signs with.
    pub fn api_key(&self) -> &str {
        self.credential.api_key()
    }

    /// The context used to send requests.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Build the headers of a signed request without sending it.
    ///
    /// The returned map contains `Content-Type`, `Date` and `Authorization`.
    pub async fn headers(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HeaderMap> {
        let req = self
            .signed_request(method, url, params, Bytes::copy_from_slice(body))
            .await?;
        Ok(req.into_parts().0.headers)
    }

    /// Send a signed `GET` request.
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Response<Bytes>> {
        self.send(Method::GET, url, params, Bytes::new()).await
    }

    /// Send a signed `POST` request.
    pub async fn post(
        &self,
        url: &str,
        params: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response<Bytes>> {
        self.send(Method::POST, url, params, body.into()).await
    }

    /// Send a signed `PATCH` request.
    pub async fn patch(
        &self,
        url: &str,
        params: &[(&str, &str)],
        body: impl Into<Bytes>,
    ) -> Result<Response<Bytes>> {
        self.send(Method::PATCH, url, params, body.into()).await
    }

    /// Sign and send a request with any method.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        body: Bytes,
    ) -> Result<Response<Bytes>> {
        let req = self.signed_request(method, url, params, body).await?;
        debug!("sending {} {}", req.method(), req.uri());

        let resp = self.ctx.http_send(req).await?;
        debug!("received {} from {url}", resp.status());
        Ok(resp)
    }

    async fn signed_request(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        body: Bytes,
    ) -> Result<Request<Bytes>> {
        let (mut parts, body) = Request::builder()
            .method(method)
            .uri(build_uri(url, params)?)
            .header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON))
            .body(body)?
            .into_parts();

        self.signer
            .sign_request(&self.ctx, &mut parts, &body, Some(&self.credential))
            .await?;
        Ok(Request::from_parts(parts, body))
    }
}

/// Append `params` to `url` as an urlencoded query.
fn build_uri(url: &str, params: &[(&str, &str)]) -> Result<Uri> {
    if params.is_empty() {
        return Ok(url.parse()?);
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    let sep = if url.contains('?') { '&' } else { '?' };
    Ok(format!("{url}{sep}{query}").parse()?)
}
