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

use crate::{Config, Credential};
use async_trait::async_trait;
use prodsign_core::{Context, ProvideCredential, Result};

/// ConfigCredentialProvider loads the credential from a [`Config`].
///
/// Returns `None` unless all three values are set and non-empty. Call
/// [`Config::from_env`] first to fall back to environment variables.
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Config,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let get = |v: &Option<String>| v.clone().filter(|v| !v.is_empty());

        match (
            get(&self.config.access_key_id),
            get(&self.config.secret_key),
            get(&self.config.partner_tag),
        ) {
            (Some(ak), Some(sk), Some(tag)) => Ok(Some(Credential::new(ak, sk, tag)?)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_credential_provider() -> anyhow::Result<()> {
        let config = Config::new()
            .with_access_key_id("test_access_key")
            .with_secret_key("test_secret_key")
            .with_partner_tag("mytag");

        let cred = ConfigCredentialProvider::new(config)
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.access_key_id, "test_access_key");
        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_incomplete() -> anyhow::Result<()> {
        let config = Config::new().with_access_key_id("test_access_key");

        let cred = ConfigCredentialProvider::new(config)
            .provide_credential(&Context::new())
            .await?;
        assert!(cred.is_none());
        Ok(())
    }
}
