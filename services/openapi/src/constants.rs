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

//! Constants used by the zaoshu open api.

// Env values used by zaoshu.
/// Env holding the api key.
pub const ZAOSHU_API_KEY: &str = "ZAOSHU_API_KEY";
/// Env holding the api secret.
pub const ZAOSHU_API_SECRET: &str = "ZAOSHU_API_SECRET";
/// Env overriding the base url.
pub const ZAOSHU_BASE_URL: &str = "ZAOSHU_BASE_URL";

/// Base url of the v2 open api.
pub const DEFAULT_BASE_URL: &str = "https://openapi.zaoshu.io/v2";

/// Scheme literal at the front of the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "ZAOSHU";

/// Content type sent and signed on every request.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Query parameter selecting the format of a task result file.
pub const RESULT_CONTENT_TYPE: &str = "contentType";

/// Prefix of the `Content-Disposition` header on result files.
pub const CONTENT_DISPOSITION_PREFIX: &str = "attachment; filename*=UTF-8''";
