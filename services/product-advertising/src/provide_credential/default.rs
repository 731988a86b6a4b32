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

use crate::provide_credential::EnvCredentialProvider;
use crate::Credential;
use async_trait::async_trait;
use prodsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider tries the built-in sources in order.
///
/// Currently this is:
///
/// 1. Environment variables (`PAAPI_ACCESS_KEY_ID`, `PAAPI_SECRET_KEY`, `PAAPI_PARTNER_TAG`)
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::{Config, ConfigCredentialProvider};
    use prodsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_default_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv::default());

        let x = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .expect("load must succeed");
        assert!(x.is_none());
    }

    #[tokio::test]
    async fn test_default_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (PAAPI_ACCESS_KEY_ID.to_string(), "access_key_id".to_string()),
                (PAAPI_SECRET_KEY.to_string(), "secret_key".to_string()),
                (PAAPI_PARTNER_TAG.to_string(), "partner_tag".to_string()),
            ]),
        });

        let x = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .expect("load must succeed")
            .expect("must load succeed");
        assert_eq!("access_key_id", x.access_key_id);
        assert_eq!("secret_key", x.secret_key);
        assert_eq!("partner_tag", x.partner_tag);
    }

    #[tokio::test]
    async fn test_default_with_custom_chain() {
        let _ = env_logger::builder().is_test(true).try_init();

        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(ConfigCredentialProvider::new(
                Config::new()
                    .with_access_key_id("config_ak")
                    .with_secret_key("config_sk")
                    .with_partner_tag("config_tag"),
            ));

        let x = DefaultCredentialProvider::with_chain(chain)
            .provide_credential(&Context::new())
            .await
            .expect("load must succeed")
            .expect("must load succeed");
        assert_eq!("config_ak", x.access_key_id);
    }
}
