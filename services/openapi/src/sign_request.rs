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

//! Zaoshu open api request signer.
use std::fmt::Write;

use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use http::header::DATE;
use http::HeaderValue;
use log::debug;
use zaoshu_core::hash::base64_hmac_sha256;
use zaoshu_core::time::{format_http_date, now, DateTime};
use zaoshu_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::AUTHORIZATION_SCHEME;
use crate::credential::Credential;

/// RequestSigner that implements the `ZAOSHU` authorization.
///
/// It stamps a `Date` header with the signing time and adds
/// `Authorization: ZAOSHU <api_key>:<signature>`. The `Content-Type` header
/// must already be present on the request since it's part of the signature.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        let date = format_http_date(self.time.unwrap_or_else(now));

        let mut req = SigningRequest::build(parts)?;
        let signature = sign(
            cred.api_secret(),
            req.method.as_str(),
            req.header_get_or_default(&CONTENT_TYPE)?,
            &date,
            &req.query,
            body,
        )?;

        req.headers.insert(DATE, date.parse()?);
        req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = format!(
                "{AUTHORIZATION_SCHEME} {}:{signature}",
                cred.api_key()
            )
            .parse()?;
            value.set_sensitive(true);

            value
        });

        req.apply(parts)
    }
}

/// Compute the base64 encoded HMAC-SHA256 signature of a request.
///
/// The result only depends on its inputs: the same secret, method, content
/// type, date, query and body always give the same signature.
///
/// Returns a request invalid error if `body` is not valid UTF-8.
///
/// ```
/// use zaoshu_openapi::sign;
///
/// # fn main() -> zaoshu_core::Result<()> {
/// let query = [("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())];
/// let signature = sign(
///     "1234567890-=",
///     "POST",
///     "application/json; charset=utf-8",
///     "Wed, 18 Mar 2016 08:04:06 GMT",
///     &query,
///     br#"{"v":"tt"}"#,
/// )?;
/// assert_eq!("QzXPkAH7JU5CtFRilL0GgRgdxYyqXKnwdln94ZARis0=", signature);
/// # Ok(())
/// # }
/// ```
pub fn sign(
    secret: &str,
    method: &str,
    content_type: &str,
    date: &str,
    query: &[(String, String)],
    body: &[u8],
) -> Result<String> {
    let string_to_sign = string_to_sign(method, content_type, date, query, body)?;
    Ok(base64_hmac_sha256(
        secret.as_bytes(),
        string_to_sign.as_bytes(),
    ))
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// Method + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// key1=value1 + "\n" + key2=value2 + "\n" + ... +
/// Body
/// ```
///
/// Query pairs are sorted by key and neither escaped nor joined with `&`:
/// every pair takes its own line. Without query the pair section is a
/// single empty line. An empty body contributes an empty last line.
pub fn string_to_sign(
    method: &str,
    content_type: &str,
    date: &str,
    query: &[(String, String)],
    body: &[u8],
) -> Result<String> {
    let body = std::str::from_utf8(body).map_err(|e| {
        Error::request_invalid("request body must be a UTF-8 string to be signed").with_source(e)
    })?;

    let mut s = String::with_capacity(
        method.len() + content_type.len() + date.len() + body.len() + 16,
    );
    writeln!(&mut s, "{method}")?;
    writeln!(&mut s, "{content_type}")?;
    writeln!(&mut s, "{date}")?;

    if query.is_empty() {
        s.push('\n');
    } else {
        // Stable sort keeps repeated keys in their original order.
        let mut pairs: Vec<&(String, String)> = query.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        for (k, v) in pairs {
            writeln!(&mut s, "{k}={v}")?;
        }
    }
    s.push_str(body);

    debug!("string to sign: {:?}", &s);
    Ok(s)
}
