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

use crate::config::parse_endpoint;
use crate::constants::*;
use crate::{Config, Credential, Document, ParameterSet, RequestSigner};
use bytes::Bytes;
use log::debug;
use prodsign_core::{Context, Error, Result};

/// Client for the product advertising API.
///
/// Every call assembles and signs a fresh query, then issues one GET through
/// the context's [`prodsign_core::HttpSend`]. Parameter and signing errors are
/// raised before anything is sent.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: RequestSigner,
    credential: Credential,

    endpoint: String,
    host: String,
    path: String,
}

impl Client {
    /// Create a new client for the default endpoint.
    pub fn new(ctx: Context, signer: RequestSigner, credential: Credential) -> Self {
        Self {
            ctx,
            signer,
            credential,

            endpoint: API_ENDPOINT.to_string(),
            host: API_HOST.to_string(),
            path: API_PATH.to_string(),
        }
    }

    /// Create a client from config.
    ///
    /// All three credential values must be present.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let credential = Credential::new(
            config.access_key_id.clone().unwrap_or_default(),
            config.secret_key.clone().unwrap_or_default(),
            config.partner_tag.clone().unwrap_or_default(),
        )?;

        Self::new(ctx, RequestSigner::new(), credential).with_endpoint(config.endpoint())
    }

    /// Send requests to another endpoint.
    ///
    /// The endpoint's host and path are used for signing.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        let (host, path) = parse_endpoint(endpoint)?;
        self.endpoint = endpoint.to_string();
        self.host = host;
        self.path = path;
        Ok(self)
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the signed url for an operation without sending it.
    pub fn signed_url(&self, operation: &str, params: &ParameterSet) -> Result<String> {
        let signed =
            self.signer
                .signed_query(operation, params, &self.credential, &self.host, &self.path)?;
        Ok(signed.url(&self.endpoint))
    }

    /// Call an operation and return the raw response body.
    ///
    /// Non-success statuses are returned as [`prodsign_core::ErrorKind::Transport`].
    pub async fn get_raw(&self, operation: &str, params: &ParameterSet) -> Result<Bytes> {
        let url = self.signed_url(operation, params)?;
        debug!("sending {operation} request: {url}");

        let req = http::Request::get(url.as_str()).body(Bytes::new())?;
        let resp = self
            .ctx
            .http_send(req)
            .await
            .map_err(|e| e.with_context(format!("operation: {operation}")))?;

        let (parts, body) = resp.into_parts();
        debug!("{operation} responded with {}", parts.status);
        if !parts.status.is_success() {
            return Err(
                Error::transport(format!("request failed with status {}", parts.status))
                    .with_context(format!("operation: {operation}"))
                    .with_context(format!("response: {}", String::from_utf8_lossy(&body))),
            );
        }

        Ok(body)
    }

    /// Call an operation and parse the response.
    pub async fn get(&self, operation: &str, params: &ParameterSet) -> Result<Document> {
        let body = self.get_raw(operation, params).await?;
        Document::parse(&body).map_err(|e| e.with_context(format!("operation: {operation}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use prodsign_core::time::parse_rfc3339;
    use prodsign_core::{ErrorKind, HttpSend};
    use std::sync::{Arc, Mutex};

    const EXPECTED_URL: &str = "http://webservices.amazon.com/onca/xml?Service=AWSECommerceService\
        &AssociateTag=mytag&AWSAccessKeyId=AKIDEXAMPLE&Operation=ItemLookup\
        &Version=2011-08-01&Timestamp=2013-01-01T00%3A00%3A00Z\
        &Signature=aa5%2F2URgKHfc6diE9PMjF3A8p%2BH5z8AClhD4h0Iy%2BfY%3D";

    /// Replies with a fixed response and records every requested uri.
    #[derive(Debug, Clone)]
    struct MockHttpSend {
        status: StatusCode,
        body: &'static str,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                requests: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            assert_eq!(req.method(), http::Method::GET);
            self.requests.lock().unwrap().push(req.uri().to_string());

            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))?)
        }
    }

    fn client(http: MockHttpSend) -> Client {
        let signer =
            RequestSigner::new().with_time(parse_rfc3339("2013-01-01T00:00:00Z").unwrap());
        let cred = Credential::new("AKIDEXAMPLE", "secret", "mytag").unwrap();
        Client::new(Context::new().with_http_send(http), signer, cred)
    }

    #[test]
    fn test_signed_url() -> Result<()> {
        let client = client(MockHttpSend::new(StatusCode::OK, ""));
        assert_eq!(
            client.signed_url("ItemLookup", &ParameterSet::new())?,
            EXPECTED_URL
        );
        Ok(())
    }

    #[test]
    fn test_signed_url_custom_endpoint() -> Result<()> {
        let client = client(MockHttpSend::new(StatusCode::OK, ""))
            .with_endpoint("http://webservices.amazon.co.uk/onca/xml")?;
        let url = client.signed_url("ItemSearch", &ParameterSet::new().with("Keywords", "rust"))?;

        assert!(url.starts_with("http://webservices.amazon.co.uk/onca/xml?Keywords=rust&"));
        assert!(url.ends_with("&Signature=Qu04FAj803ZPfeVPkbabuf2%2BcP5ShGzty0m9Or91gYo%3D"));
        Ok(())
    }

    #[tokio::test]
    async fn test_get() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let http = MockHttpSend::new(
            StatusCode::OK,
            "<ItemLookupResponse><Items><Item><ASIN>B00008OE6I</ASIN></Item></Items></ItemLookupResponse>",
        );
        let client = client(http.clone());

        let doc = client.get("ItemLookup", &ParameterSet::new()).await?;
        assert_eq!(doc.find("Items/Item/ASIN").map(|e| e.text()), Some("B00008OE6I"));
        assert_eq!(http.requests(), vec![EXPECTED_URL.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_raw() -> Result<()> {
        let client = client(MockHttpSend::new(StatusCode::OK, "not xml at all"));

        let body = client.get_raw("ItemLookup", &ParameterSet::new()).await?;
        assert_eq!(body, Bytes::from_static(b"not xml at all"));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_error_status() {
        let client = client(MockHttpSend::new(
            StatusCode::FORBIDDEN,
            "<ItemLookupErrorResponse><Error><Code>SignatureDoesNotMatch</Code></Error></ItemLookupErrorResponse>",
        ));

        let err = client
            .get("ItemLookup", &ParameterSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.is_local());
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("SignatureDoesNotMatch"));
    }

    #[tokio::test]
    async fn test_get_malformed_body() {
        let client = client(MockHttpSend::new(StatusCode::OK, "<ItemLookupResponse>"));

        let err = client
            .get("ItemLookup", &ParameterSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_get_without_transport() {
        let signer = RequestSigner::new();
        let cred = Credential::new("AKIDEXAMPLE", "secret", "mytag").unwrap();
        let client = Client::new(Context::new(), signer, cred);

        let err = client
            .get("ItemLookup", &ParameterSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_invalid_parameter_before_network() {
        let http = MockHttpSend::new(StatusCode::OK, "<r/>");
        let client = client(http.clone());

        let params: ParameterSet = [("", "B00008OE6I")].into_iter().collect();
        let err = client.get("ItemLookup", &params).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.is_local());
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_signing_error_before_network() {
        let http = MockHttpSend::new(StatusCode::OK, "<r/>");
        let cred = Credential {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_key: String::new(),
            partner_tag: "mytag".to_string(),
        };
        let client = Client::new(
            Context::new().with_http_send(http.clone()),
            RequestSigner::new(),
            cred,
        );

        let err = client
            .get("ItemLookup", &ParameterSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);
        assert!(http.requests().is_empty());
    }

    #[test]
    fn test_from_config() -> Result<()> {
        let config = Config::new()
            .with_access_key_id("AKIDEXAMPLE")
            .with_secret_key("secret")
            .with_partner_tag("mytag")
            .with_endpoint("https://webservices.amazon.de/onca/xml");

        let client = Client::from_config(Context::new(), &config)?;
        assert_eq!(client.endpoint(), "https://webservices.amazon.de/onca/xml");

        let err = Client::from_config(Context::new(), &Config::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        Ok(())
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
