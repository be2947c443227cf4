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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias of `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Format used by the `Date` header: "Wed, 18 Mar 2016 08:04:06 GMT"
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Create a new DateTime with current time, truncated to second precision.
pub fn now() -> DateTime {
    let now = Utc::now();
    chrono::DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Format time into http date: `Wed, 18 Mar 2016 08:04:06 GMT`
///
/// The output is always in GMT and never carries sub-second precision.
pub fn format_http_date(t: DateTime) -> String {
    t.format(HTTP_DATE).to_string()
}

/// Parse http date like `Wed, 18 Mar 2016 08:04:06 GMT` into DateTime.
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    let v = chrono::DateTime::parse_from_rfc2822(s)
        .map_err(|e| Error::unexpected(format!("invalid http date: {s}")).with_source(e))?;
    Ok(v.with_timezone(&Utc))
}
