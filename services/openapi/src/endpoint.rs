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

/// Resources exposed by the open api.
///
/// Identifiers are substituted as given, without escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `/instances`
    InstanceList,
    /// `/instance/:instance_id`
    Instance(&'a str),
    /// `/instance/:instance_id/schema`
    InstanceSchema(&'a str),
    /// `/instance/:instance_id/tasks`
    TaskList(&'a str),
    /// `/instance/:instance_id/task/:task_id`
    Task(&'a str, &'a str),
    /// `/instance/:instance_id/task/:task_id/result/file`
    TaskResultFile(&'a str, &'a str),
    /// `/user/account`
    UserAccount,
    /// `/user/wallet`
    UserWallet,
}

impl Endpoint<'_> {
    /// Render the full url of this endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');

        match self {
            Endpoint::InstanceList => format!("{base_url}/instances"),
            Endpoint::Instance(id) => format!("{base_url}/instance/{id}"),
            Endpoint::InstanceSchema(id) => format!("{base_url}/instance/{id}/schema"),
            Endpoint::TaskList(id) => format!("{base_url}/instance/{id}/tasks"),
            Endpoint::Task(id, task_id) => format!("{base_url}/instance/{id}/task/{task_id}"),
            Endpoint::TaskResultFile(id, task_id) => {
                format!("{base_url}/instance/{id}/task/{task_id}/result/file")
            }
            Endpoint::UserAccount => format!("{base_url}/user/account"),
            Endpoint::UserWallet => format!("{base_url}/user/wallet"),
        }
    }
}
