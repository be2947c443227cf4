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

//! Walk through the open api with credentials from env.
//!
//! ```shell
//! ZAOSHU_API_KEY=... ZAOSHU_API_SECRET=... cargo run --example demo
//! ```

use std::time::Duration;

use bytes::Bytes;
use zaoshu::{default_client, Error, FileType, Result};

fn print_response(title: &str, resp: &http::Response<Bytes>) {
    println!("====[{title}]========================================");
    println!("status: {}", resp.status());
    println!("headers: {:?}", resp.headers());
    println!("body: {}", String::from_utf8_lossy(resp.body()));
    println!();
}

/// Pick `data[index].id` from a list response.
fn pick_id(resp: &http::Response<Bytes>, last: bool) -> Result<Option<String>> {
    let v: serde_json::Value = serde_json::from_slice(resp.body())
        .map_err(|e| Error::response_invalid("response is not json").with_source(e))?;

    let items = v["data"].as_array();
    let item = match items {
        Some(items) if last => items.last(),
        Some(items) => items.first(),
        None => None,
    };
    Ok(item.and_then(|v| v["id"].as_str()).map(String::from))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let _ = dotenv::dotenv();

    let client = default_client().await?;

    print_response("account", &client.user().account().await?);
    print_response("wallet", &client.user().wallet().await?);

    let instances = client.instance().list().await?;
    print_response("instances", &instances);

    let Some(instance_id) = pick_id(&instances, false)? else {
        println!("no instance found, create one first");
        return Ok(());
    };

    let instance = client.instance();
    print_response("instance", &instance.item(&instance_id).await?);
    print_response("schema", &instance.schema(&instance_id).await?);
    print_response(
        "edit",
        &instance
            .edit(&instance_id, Some("demo instance"), None)
            .await?,
    );
    print_response("run", &instance.run(&instance_id).await?);

    println!("waiting 10s for the run to finish");
    tokio::time::sleep(Duration::from_secs(10)).await;

    let tasks = instance.task_list(&instance_id).await?;
    print_response("tasks", &tasks);

    let Some(task_id) = pick_id(&tasks, true)? else {
        println!("no task found");
        return Ok(());
    };
    print_response("task", &instance.task(&instance_id, &task_id).await?);

    let path = instance
        .save_result(&instance_id, &task_id, FileType::Json, "datafile")
        .await?;
    println!("result saved to {}", path.display());
    Ok(())
}
