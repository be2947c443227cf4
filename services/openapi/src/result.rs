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

//! Materialize downloaded task result files.

use std::fmt::{Display, Formatter};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use http::header::CONTENT_DISPOSITION;
use http::HeaderMap;
use log::debug;
use percent_encoding::percent_decode_str;
use zaoshu_core::{Error, Result};

use crate::constants::CONTENT_DISPOSITION_PREFIX;

/// Format of a task result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    /// Comma separated values, the server default.
    #[default]
    Csv,
    /// JSON document.
    Json,
}

impl FileType {
    /// Value sent as the `contentType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Json => "json",
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded content of a task result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultData {
    /// A plain text result.
    Single(String),
    /// A zipped result holding the surface and depth crawl outputs.
    Pair {
        /// First entry of the archive.
        surface: String,
        /// Last entry of the archive.
        depth: String,
    },
}

/// Extract the file name from the `Content-Disposition` header.
///
/// Both `attachment; filename*=UTF-8''<name>` and `filename="<name>"` forms
/// are accepted; percent escapes are decoded. Any directory part is
/// rejected so the name is always safe to join under a target dir.
pub fn file_name(headers: &HeaderMap) -> Result<String> {
    let value = headers
        .get(CONTENT_DISPOSITION)
        .ok_or_else(|| Error::response_invalid("response has no content-disposition header"))?
        .to_str()
        .map_err(|e| {
            Error::response_invalid("content-disposition is not valid ascii").with_source(e)
        })?;

    let raw = if let Some(name) = value.strip_prefix(CONTENT_DISPOSITION_PREFIX) {
        name
    } else if let Some((_, name)) = value.split_once("filename=") {
        name.split(';').next().unwrap_or_default().trim().trim_matches('"')
    } else {
        return Err(Error::response_invalid(format!(
            "content-disposition has no file name: {value}"
        )));
    };

    let name = percent_decode_str(raw.trim())
        .decode_utf8()
        .map_err(|e| Error::response_invalid("file name is not valid utf-8").with_source(e))?
        .into_owned();

    match Path::new(&name).file_name() {
        Some(v) if v == name.as_str() => Ok(name),
        _ => Err(Error::response_invalid(format!(
            "file name {name:?} is not a plain file name"
        ))),
    }
}

/// Decode result bytes in memory.
///
/// A `.zip` file must hold exactly two entries: the first is the surface
/// result and the last is the depth result. Anything else is read as a
/// single UTF-8 text.
pub fn decode(file_name: &str, content: &[u8]) -> Result<ResultData> {
    if !is_zip(file_name) {
        let text = String::from_utf8(content.to_vec())?;
        return Ok(ResultData::Single(text));
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| Error::response_invalid(format!("{file_name} is not a zip")).with_source(e))?;
    if archive.len() != 2 {
        return Err(Error::response_invalid(format!(
            "{file_name} holds {} entries, expect 2",
            archive.len()
        )));
    }
    debug!("decoding zipped result {file_name}");

    let surface = read_entry(&mut archive, 0, content.len())?;
    let depth = read_entry(&mut archive, 1, content.len())?;
    Ok(ResultData::Pair { surface, depth })
}

/// Write result bytes as `dir/file_name`, creating `dir` when needed.
///
/// Returns the absolute path of the written file.
pub async fn save(dir: impl AsRef<Path>, file_name: &str, content: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, content).await?;
    debug!("saved {} bytes to {}", content.len(), path.display());

    Ok(tokio::fs::canonicalize(&path).await?)
}

/// Sizes declared inside the archive are untrusted, preallocate at most the
/// archive length.
fn entry_capacity(declared: u64, archive_len: usize) -> usize {
    usize::try_from(declared).map_or(archive_len, |v| v.min(archive_len))
}

fn is_zip(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn read_entry(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    index: usize,
    archive_len: usize,
) -> Result<String> {
    let mut entry = archive.by_index(index).map_err(|e| {
        Error::response_invalid(format!("failed to open zip entry {index}")).with_source(e)
    })?;

    let mut buf = Vec::with_capacity(entry_capacity(entry.size(), archive_len));
    entry.read_to_end(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}
