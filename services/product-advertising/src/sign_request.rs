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

use crate::canonical::{canonical_query, canonicalize, percent_encode};
use crate::constants::*;
use crate::{Credential, ParameterSet};
use async_trait::async_trait;
use http::request::Parts;
use log::debug;
use prodsign_core::hash::base64_hmac_sha256;
use prodsign_core::time::{format_iso8601, now, DateTime};
use prodsign_core::{Context, Error, Result, SignRequest, SigningRequest};
use std::time::Duration;

/// Operation name carried as a request extension.
///
/// [`RequestSigner`] reads it when signing an `http::Request`; without it the
/// `Operation` query parameter is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation(pub String);

impl Operation {
    /// Create a new operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Assembled and signed query for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    pairs: Vec<String>,
    signature: String,
}

impl SignedQuery {
    /// Encoded `key=value` pairs in insertion order.
    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    /// Percent-encoded signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Query string with the signature appended last.
    pub fn query(&self) -> String {
        let mut s = self.pairs.join("&");
        if !s.is_empty() {
            s.push('&');
        }
        s.push_str(PARAM_SIGNATURE);
        s.push('=');
        s.push_str(&self.signature);
        s
    }

    /// Full request url for this endpoint.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{endpoint}?{}", self.query())
    }

    fn into_query_pairs(self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .pairs
            .into_iter()
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair, String::new()),
            })
            .collect();
        query.push((PARAM_SIGNATURE.to_string(), self.signature));
        query
    }
}

/// Build the string to sign.
///
/// ```text
/// GET
/// webservices.amazon.com
/// /onca/xml
/// <canonical query>
/// ```
pub fn string_to_sign(host: &str, path: &str, canonical_query: &str) -> String {
    format!("GET\n{host}\n{path}\n{canonical_query}")
}

/// Calculate the percent-encoded signature over canonical pairs.
///
/// The pairs are sorted internally; the caller's order is not changed.
pub fn signature(pairs: &[String], host: &str, path: &str, secret_key: &str) -> Result<String> {
    if secret_key.is_empty() {
        return Err(Error::signing("secret key must not be empty"));
    }

    let query = canonical_query(pairs);
    debug!("calculated canonical query: {query}");
    let string_to_sign = string_to_sign(host, path, &query);
    debug!("calculated string to sign: {string_to_sign}");

    let signature = base64_hmac_sha256(secret_key.as_bytes(), string_to_sign.as_bytes());
    Ok(percent_encode(&signature))
}

/// RequestSigner that implements the product advertising query signature.
///
/// - [Request authentication](https://docs.aws.amazon.com/AWSECommerceService/latest/DG/Query_QueryAuth.html)
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Inject the fixed fields into `params`, then canonicalize and sign.
    ///
    /// Fields already present are replaced in place. Empty credential values
    /// are left out of the request.
    pub fn signed_query(
        &self,
        operation: &str,
        params: &ParameterSet,
        cred: &Credential,
        host: &str,
        path: &str,
    ) -> Result<SignedQuery> {
        if operation.is_empty() {
            return Err(Error::invalid_parameter("operation must not be empty"));
        }
        let now = self.time.unwrap_or_else(now);

        let mut params = params.clone();
        params.insert(PARAM_SERVICE, SERVICE_NAME);
        if !cred.partner_tag.is_empty() {
            params.insert(PARAM_ASSOCIATE_TAG, cred.partner_tag.as_str());
        }
        if !cred.access_key_id.is_empty() {
            params.insert(PARAM_ACCESS_KEY_ID, cred.access_key_id.as_str());
        }
        params.insert(PARAM_OPERATION, operation);
        params.insert(PARAM_VERSION, API_VERSION);
        params.insert(PARAM_TIMESTAMP, format_iso8601(now));

        let pairs = canonicalize(&params)?;
        let signature = signature(&pairs, host, path, &cred.secret_key)
            .map_err(|e| e.with_context(format!("operation: {operation}")))?;

        Ok(SignedQuery { pairs, signature })
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::signing(
                "query signature does not support expiration",
            ));
        }
        let Some(cred) = credential else {
            return Ok(());
        };

        let operation = req.extensions.get::<Operation>().map(|v| v.0.clone());
        let mut signed_req = SigningRequest::build(req)?;

        let params: ParameterSet = std::mem::take(&mut signed_req.query).into_iter().collect();
        let operation = match operation {
            Some(v) => v,
            None => params
                .get(PARAM_OPERATION)
                .map(String::from)
                .ok_or_else(|| Error::invalid_parameter("operation is required for signing"))?,
        };

        let signed = self.signed_query(
            &operation,
            &params,
            cred,
            signed_req.host(),
            &signed_req.path,
        )?;
        signed_req.query = signed.into_query_pairs();

        signed_req.apply(req)
    }
}
