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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use prodsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `PAAPI_ACCESS_KEY_ID`: the access key id
/// - `PAAPI_SECRET_KEY`: the secret key
/// - `PAAPI_PARTNER_TAG`: the partner tag
///
/// Unset or empty variables count as missing.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let var = |key: &str| ctx.env_var(key).filter(|v| !v.is_empty());

        match (
            var(PAAPI_ACCESS_KEY_ID),
            var(PAAPI_SECRET_KEY),
            var(PAAPI_PARTNER_TAG),
        ) {
            (Some(ak), Some(sk), Some(tag)) => Ok(Some(Credential::new(ak, sk, tag)?)),
            _ => Ok(None),
        }
    }
}
