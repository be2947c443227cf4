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

//! Signed client for the zaoshu open api.
//!
//! This crate glues the pieces together:
//!
//! - [`zaoshu_core`]: context, credential providers and errors, re-exported at the root.
//! - [`openapi`]: the open api client, signer and result helpers.
//! - [`default_context`] and [`default_client`]: ready to use setup backed by
//!   `reqwest` and the process env, behind the `default-context` feature.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> zaoshu::Result<()> {
//! let client = zaoshu::default_client().await?;
//!
//! let resp = client.user().account().await?;
//! println!("{}", String::from_utf8_lossy(resp.body()));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use zaoshu_core::*;

pub mod openapi {
    //! Zaoshu open api client.
    pub use zaoshu_openapi::*;
}

pub use zaoshu_openapi::{Client, Config, Credential, FileType, ResultData};

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_client, default_context};
