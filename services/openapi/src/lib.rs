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

//! Client for the zaoshu open api.
//!
//! Every request carries a `ZAOSHU <api_key>:<signature>` authorization,
//! where the signature is a base64 HMAC-SHA256 over the method, content
//! type, date, sorted query and body of the request.
//!
//! ```no_run
//! use zaoshu_core::{Context, Result};
//! use zaoshu_openapi::{Client, Config, FileType, ResultData};
//!
//! # async fn example(ctx: Context) -> Result<()> {
//! let client = Client::from_config(ctx, Config::new()).await?;
//!
//! let resp = client.instance().list().await?;
//! println!("{}", String::from_utf8_lossy(resp.body()));
//!
//! match client
//!     .instance()
//!     .download_result("instance_id", "task_id", FileType::Csv)
//!     .await?
//! {
//!     ResultData::Single(text) => println!("{text}"),
//!     ResultData::Pair { surface, depth } => println!("{surface}\n{depth}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{sign, string_to_sign, RequestSigner};

mod transport;
pub use transport::Transport;

mod endpoint;
pub use endpoint::Endpoint;

pub mod result;
pub use result::{FileType, ResultData};

mod instance;
pub use instance::Instance;

mod user;
pub use user::User;

mod client;
pub use client::Client;

pub mod constants;
