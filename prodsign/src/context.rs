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

use prodsign_core::{Context, OsEnv};
use prodsign_http_send_reqwest::ReqwestHttpSend;

/// Create a context that sends requests with reqwest and reads the OS environment.
///
/// Pass a preconfigured `reqwest::Client` to control timeouts and proxies:
///
/// ```no_run
/// use prodsign::{Context, OsEnv};
/// use prodsign_http_send_reqwest::ReqwestHttpSend;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), reqwest::Error> {
/// let client = reqwest::Client::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// let ctx = Context::new()
///     .with_http_send(ReqwestHttpSend::new(client))
///     .with_env(OsEnv);
/// # Ok(())
/// # }
/// ```
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_reads_os_env() {
        let ctx = default_context();
        assert_eq!(
            ctx.env_var("CARGO_PKG_NAME"),
            std::env::var("CARGO_PKG_NAME").ok()
        );
    }
}
