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
use http::Response;
use zaoshu_core::Result;

use crate::endpoint::Endpoint;
use crate::transport::Transport;

/// The account behind the api key.
#[derive(Debug, Clone, Copy)]
pub struct User<'a> {
    transport: &'a Transport,
    base_url: &'a str,
}

impl<'a> User<'a> {
    pub(crate) fn new(transport: &'a Transport, base_url: &'a str) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Get account details.
    pub async fn account(&self) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::UserAccount.url(self.base_url), &[])
            .await
    }

    /// Get wallet balance.
    pub async fn wallet(&self) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::UserWallet.url(self.base_url), &[])
            .await
    }
}
