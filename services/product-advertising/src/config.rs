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

use crate::constants::*;
use prodsign_core::utils::Redact;
use prodsign_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for the product advertising client.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `partner_tag` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_PARTNER_TAG`]
    pub partner_tag: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PAAPI_ENDPOINT`]
    /// - default: [`API_ENDPOINT`]
    pub endpoint: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key_id
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set partner_tag
    pub fn with_partner_tag(mut self, partner_tag: impl Into<String>) -> Self {
        self.partner_tag = Some(partner_tag.into());
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(PAAPI_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_PARTNER_TAG) {
            self.partner_tag.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PAAPI_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        self
    }

    /// Endpoint to send requests to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(API_ENDPOINT)
    }

    /// Parse the endpoint into the host and path used for signing.
    pub fn endpoint_parts(&self) -> Result<(String, String)> {
        parse_endpoint(self.endpoint())
    }
}

/// Split an endpoint url into the host and path that take part in the signature.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<(String, String)> {
    let uri: http::Uri = endpoint.parse().map_err(|e| {
        Error::config_invalid("endpoint is not a valid url")
            .with_source(e)
            .with_context(format!("endpoint: {endpoint}"))
    })?;

    let host = uri.authority().ok_or_else(|| {
        Error::config_invalid("endpoint must contain a host")
            .with_context(format!("endpoint: {endpoint}"))
    })?;
    if uri.query().is_some() {
        return Err(Error::config_invalid("endpoint must not contain a query")
            .with_context(format!("endpoint: {endpoint}")));
    }

    let path = match uri.path() {
        "" => "/",
        v => v,
    };
    Ok((host.to_string(), path.to_string()))
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("partner_tag", &self.partner_tag)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prodsign_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (PAAPI_ACCESS_KEY_ID.to_string(), "env_ak".to_string()),
                (PAAPI_SECRET_KEY.to_string(), "env_sk".to_string()),
                (PAAPI_PARTNER_TAG.to_string(), "env_tag".to_string()),
            ]),
        });

        let cfg = Config::new().with_partner_tag("mytag").from_env(&ctx);
        assert_eq!(cfg.access_key_id.as_deref(), Some("env_ak"));
        assert_eq!(cfg.secret_key.as_deref(), Some("env_sk"));
        assert_eq!(cfg.partner_tag.as_deref(), Some("mytag"));
        assert_eq!(cfg.endpoint(), API_ENDPOINT);
    }

    #[test]
    fn test_endpoint_parts() -> Result<()> {
        assert_eq!(
            Config::new().endpoint_parts()?,
            (API_HOST.to_string(), API_PATH.to_string())
        );

        let cfg = Config::new().with_endpoint("https://webservices.amazon.co.uk/onca/xml");
        assert_eq!(
            cfg.endpoint_parts()?,
            (
                "webservices.amazon.co.uk".to_string(),
                "/onca/xml".to_string()
            )
        );
        Ok(())
    }

    #[test]
    fn test_endpoint_parts_invalid() {
        for endpoint in ["/onca/xml", "http://[::1", "http://localhost/onca/xml?a=b"] {
            let err = Config::new()
                .with_endpoint(endpoint)
                .endpoint_parts()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid, "{endpoint}");
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cfg = Config::new().with_secret_key("wJalrXUtnFEMIK7MDENG");
        assert!(!format!("{cfg:?}").contains("wJalrXUtnFEMIK7MDENG"));
    }
}
