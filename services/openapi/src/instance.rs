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

use std::path::{Path, PathBuf};

use bytes::Bytes;
use http::Response;
use log::debug;
use serde::Serialize;
use zaoshu_core::{Error, Result};

use crate::constants::RESULT_CONTENT_TYPE;
use crate::endpoint::Endpoint;
use crate::result::{self, FileType, ResultData};
use crate::transport::Transport;

/// Crawler instances and their tasks.
#[derive(Debug, Clone, Copy)]
pub struct Instance<'a> {
    transport: &'a Transport,
    base_url: &'a str,
}

#[derive(Serialize)]
struct EditInstance<'a> {
    title: Option<&'a str>,
    result_notify_uri: Option<&'a str>,
}

impl<'a> Instance<'a> {
    pub(crate) fn new(transport: &'a Transport, base_url: &'a str) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// List all instances of the account.
    pub async fn list(&self) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::InstanceList.url(self.base_url), &[])
            .await
    }

    /// Get one instance.
    pub async fn item(&self, instance_id: &str) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::Instance(instance_id).url(self.base_url), &[])
            .await
    }

    /// Get the result schema of an instance.
    pub async fn schema(&self, instance_id: &str) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::InstanceSchema(instance_id).url(self.base_url), &[])
            .await
    }

    /// List the tasks of an instance.
    pub async fn task_list(&self, instance_id: &str) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::TaskList(instance_id).url(self.base_url), &[])
            .await
    }

    /// Get one task of an instance.
    pub async fn task(&self, instance_id: &str, task_id: &str) -> Result<Response<Bytes>> {
        self.transport
            .get(&Endpoint::Task(instance_id, task_id).url(self.base_url), &[])
            .await
    }

    /// Start a new run of an instance with an empty `{}` body.
    pub async fn run(&self, instance_id: &str) -> Result<Response<Bytes>> {
        self.run_raw(instance_id, "{}").await
    }

    /// Start a new run of an instance, sending `body` serialized as JSON.
    pub async fn run_with<B: Serialize + ?Sized>(
        &self,
        instance_id: &str,
        body: &B,
    ) -> Result<Response<Bytes>> {
        let body = serde_json::to_vec(body)
            .map_err(|e| Error::request_invalid("failed to serialize run body").with_source(e))?;
        self.run_raw(instance_id, body).await
    }

    /// Start a new run of an instance, sending an already serialized body as is.
    pub async fn run_raw(
        &self,
        instance_id: &str,
        body: impl Into<Bytes>,
    ) -> Result<Response<Bytes>> {
        self.transport
            .post(&Endpoint::Instance(instance_id).url(self.base_url), &[], body)
            .await
    }

    /// Update title and result notify uri of an instance.
    ///
    /// Fields left as `None` are sent as `null`.
    pub async fn edit(
        &self,
        instance_id: &str,
        title: Option<&str>,
        result_notify_uri: Option<&str>,
    ) -> Result<Response<Bytes>> {
        let body = serde_json::to_vec(&EditInstance {
            title,
            result_notify_uri,
        })
        .map_err(|e| Error::request_invalid("failed to serialize edit body").with_source(e))?;

        self.transport
            .patch(&Endpoint::Instance(instance_id).url(self.base_url), &[], body)
            .await
    }

    /// Download the result file of a task as is.
    pub async fn download(
        &self,
        instance_id: &str,
        task_id: &str,
        file_type: FileType,
    ) -> Result<Response<Bytes>> {
        self.transport
            .get(
                &Endpoint::TaskResultFile(instance_id, task_id).url(self.base_url),
                &[(RESULT_CONTENT_TYPE, file_type.as_str())],
            )
            .await
    }

    /// Download the result file of a task and decode it in memory.
    pub async fn download_result(
        &self,
        instance_id: &str,
        task_id: &str,
        file_type: FileType,
    ) -> Result<ResultData> {
        let (file_name, content) = self.fetch_result(instance_id, task_id, file_type).await?;
        result::decode(&file_name, &content)
    }

    /// Download the result file of a task into `dir`.
    ///
    /// Returns the absolute path of the saved file.
    pub async fn save_result(
        &self,
        instance_id: &str,
        task_id: &str,
        file_type: FileType,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let (file_name, content) = self.fetch_result(instance_id, task_id, file_type).await?;
        result::save(dir, &file_name, &content).await
    }

    async fn fetch_result(
        &self,
        instance_id: &str,
        task_id: &str,
        file_type: FileType,
    ) -> Result<(String, Bytes)> {
        let resp = self.download(instance_id, task_id, file_type).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::response_invalid(format!(
                "download result failed with status {status}: {}",
                String::from_utf8_lossy(resp.body())
            )));
        }

        let file_name = result::file_name(resp.headers())?;
        debug!(
            "downloaded result file {file_name} of task {task_id}, {} bytes",
            resp.body().len()
        );
        Ok((file_name, resp.into_body()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credential;
    use async_trait::async_trait;
    use http::header::CONTENT_DISPOSITION;
    use http::{Method, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};
    use zaoshu_core::{Context, ErrorKind, HttpSend};

    const BASE_URL: &str = "http://127.0.0.1:9900/v2";
    const INSTANCE: &str = "7139aa25d85141829e4faf28ea551226";
    const TASK: &str = "48607ed016fe4b1fb19069b2b5430d59";

    /// Records requests and answers with a fixed response.
    #[derive(Debug, Clone)]
    struct MockHttpSend {
        status: StatusCode,
        disposition: Option<&'static str>,
        body: Bytes,
        requests: Arc<Mutex<Vec<Request<Bytes>>>>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, disposition: Option<&'static str>, body: impl Into<Bytes>) -> Self {
            Self {
                status,
                disposition,
                body: body.into(),
                requests: Arc::default(),
            }
        }

        fn ok() -> Self {
            Self::new(StatusCode::OK, None, "{}")
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
            self.requests.lock().unwrap().push(req);

            let mut resp = Response::builder().status(self.status);
            if let Some(v) = self.disposition {
                resp = resp.header(CONTENT_DISPOSITION, v);
            }
            Ok(resp.body(self.body.clone())?)
        }
    }

    fn transport(http: &MockHttpSend) -> Transport {
        let ctx = Context::new().with_http_send(http.clone());
        Transport::new(ctx, Credential::new("key", "secret").unwrap())
    }

    fn single_request(http: &MockHttpSend) -> Request<Bytes> {
        let mut requests = http.requests.lock().unwrap();
        assert_eq!(1, requests.len());
        requests.remove(0)
    }

    #[tokio::test]
    async fn test_get_endpoints() -> Result<()> {
        let cases: Vec<(&str, String)> = vec![
            ("list", format!("{BASE_URL}/instances")),
            ("item", format!("{BASE_URL}/instance/{INSTANCE}")),
            ("schema", format!("{BASE_URL}/instance/{INSTANCE}/schema")),
            ("task_list", format!("{BASE_URL}/instance/{INSTANCE}/tasks")),
            ("task", format!("{BASE_URL}/instance/{INSTANCE}/task/{TASK}")),
        ];

        for (name, expected) in cases {
            let http = MockHttpSend::ok();
            let transport = transport(&http);
            let instance = Instance::new(&transport, BASE_URL);

            let resp = match name {
                "list" => instance.list().await?,
                "item" => instance.item(INSTANCE).await?,
                "schema" => instance.schema(INSTANCE).await?,
                "task_list" => instance.task_list(INSTANCE).await?,
                "task" => instance.task(INSTANCE, TASK).await?,
                _ => unreachable!(),
            };
            assert_eq!(StatusCode::OK, resp.status());

            let req = single_request(&http);
            assert_eq!(Method::GET, req.method(), "{name}");
            assert_eq!(expected, req.uri().to_string(), "{name}");
            assert!(req.body().is_empty(), "{name}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_run_default_body() -> Result<()> {
        let http = MockHttpSend::ok();
        let transport = transport(&http);

        Instance::new(&transport, BASE_URL).run(INSTANCE).await?;

        let req = single_request(&http);
        assert_eq!(Method::POST, req.method());
        assert_eq!(format!("{BASE_URL}/instance/{INSTANCE}"), req.uri().to_string());
        assert_eq!(&b"{}"[..], req.body().as_ref());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_with_body() -> Result<()> {
        let http = MockHttpSend::ok();
        let transport = transport(&http);

        #[derive(Serialize)]
        struct RunArgs<'a> {
            url: &'a str,
            depth: u32,
        }

        Instance::new(&transport, BASE_URL)
            .run_with(
                INSTANCE,
                &RunArgs {
                    url: "https://zaoshu.io",
                    depth: 2,
                },
            )
            .await?;

        let req = single_request(&http);
        assert_eq!(
            r#"{"url":"https://zaoshu.io","depth":2}"#,
            std::str::from_utf8(req.body()).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_run_raw_body_is_sent_verbatim() -> Result<()> {
        let http = MockHttpSend::ok();
        let transport = transport(&http);

        let body = r#"{"url": "https://zaoshu.io", "depth": 2}"#;
        Instance::new(&transport, BASE_URL)
            .run_raw(INSTANCE, body)
            .await?;

        let req = single_request(&http);
        assert_eq!(body.as_bytes(), req.body().as_ref());
        Ok(())
    }

    #[tokio::test]
    async fn test_edit() -> Result<()> {
        let http = MockHttpSend::ok();
        let transport = transport(&http);

        Instance::new(&transport, BASE_URL)
            .edit(INSTANCE, Some("造数"), None)
            .await?;

        let req = single_request(&http);
        assert_eq!(Method::PATCH, req.method());
        assert_eq!(
            r#"{"title":"造数","result_notify_uri":null}"#,
            std::str::from_utf8(req.body()).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_download_raw() -> Result<()> {
        let http = MockHttpSend::new(StatusCode::NOT_FOUND, None, "not found");
        let transport = transport(&http);

        let resp = Instance::new(&transport, BASE_URL)
            .download(INSTANCE, TASK, FileType::Json)
            .await?;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());

        let req = single_request(&http);
        assert_eq!(
            format!("{BASE_URL}/instance/{INSTANCE}/task/{TASK}/result/file?contentType=json"),
            req.uri().to_string()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_download_result_single() -> Result<()> {
        let http = MockHttpSend::new(
            StatusCode::OK,
            Some("attachment; filename*=UTF-8''result.csv"),
            "a,b\n1,2\n",
        );
        let transport = transport(&http);

        let data = Instance::new(&transport, BASE_URL)
            .download_result(INSTANCE, TASK, FileType::Csv)
            .await?;
        assert_eq!(ResultData::Single("a,b\n1,2\n".to_string()), data);

        let req = single_request(&http);
        assert_eq!(Some("contentType=csv"), req.uri().query());
        Ok(())
    }

    #[tokio::test]
    async fn test_download_result_pair() -> Result<()> {
        let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        w.start_file("surface.json", options).unwrap();
        w.write_all(br#"[{"a":1}]"#).unwrap();
        w.start_file("depth.json", options).unwrap();
        w.write_all(br#"[{"b":2}]"#).unwrap();
        let content = w.finish().unwrap().into_inner();

        let http = MockHttpSend::new(
            StatusCode::OK,
            Some("attachment; filename*=UTF-8''result.zip"),
            content,
        );
        let transport = transport(&http);

        let data = Instance::new(&transport, BASE_URL)
            .download_result(INSTANCE, TASK, FileType::Json)
            .await?;
        assert_eq!(
            ResultData::Pair {
                surface: r#"[{"a":1}]"#.to_string(),
                depth: r#"[{"b":2}]"#.to_string(),
            },
            data
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_download_result_failed_status() {
        let http = MockHttpSend::new(StatusCode::FORBIDDEN, None, r#"{"message":"denied"}"#);
        let transport = transport(&http);

        let err = Instance::new(&transport, BASE_URL)
            .download_result(INSTANCE, TASK, FileType::Csv)
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::ResponseInvalid, err.kind());
        assert!(err.to_string().contains("denied"));
    }

    #[tokio::test]
    async fn test_save_result() -> Result<()> {
        let http = MockHttpSend::new(
            StatusCode::OK,
            Some("attachment; filename*=UTF-8''%E7%BB%93%E6%9E%9C.csv"),
            "a,b\n",
        );
        let transport = transport(&http);
        let tmp = tempfile::tempdir()?;

        let path = Instance::new(&transport, BASE_URL)
            .save_result(INSTANCE, TASK, FileType::Csv, tmp.path())
            .await?;
        assert!(path.ends_with("结果.csv"));
        assert_eq!("a,b\n", tokio::fs::read_to_string(&path).await?);
        Ok(())
    }
}
