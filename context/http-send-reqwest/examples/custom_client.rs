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
use reqwest::Client;
use std::time::Duration;
use zaoshu_core::{Context, Error, Result};
use zaoshu_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    // The zaoshu crates never retry or time out on their own, so configure
    // it on the client.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("zaoshu-example/0.1")
        .build()
        .map_err(|e| Error::config_invalid("failed to build reqwest client").with_source(e))?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // Unsigned on purpose: the server answers with 401, which is still a
    // response and not an error.
    let req = http::Request::builder()
        .method("GET")
        .uri("https://openapi.zaoshu.io/v2/user/account")
        .body(Bytes::new())?;

    let resp = ctx.http_send(req).await?;
    println!("Response status: {}", resp.status());
    for (name, value) in resp.headers() {
        println!("  {name}: {value:?}");
    }
    println!("Response body: {}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
