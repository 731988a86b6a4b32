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

//! Product Advertising API support with convenience APIs

// Re-export all product advertising types
pub use prodsign_product_advertising::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Result, Signer};

/// Default signer type for product advertising requests
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<Credential>;

/// Create a default signer for use with a plain `http::Request`.
///
/// This function creates a signer with:
/// - Default context (reqwest HTTP client, OS environment)
/// - Default credential provider (reads the `PAAPI_*` env vars)
/// - Request signer reading the [`Operation`] request extension
///
/// # Example
///
/// ```no_run
/// # async fn example() -> prodsign::Result<()> {
/// use prodsign::paapi::{default_signer, Operation};
///
/// let signer = default_signer();
/// let mut req = http::Request::get("http://webservices.amazon.com/onca/xml?ItemId=B00008OE6I")
///     .extension(Operation::new("ItemLookup"))
///     .body(())?
///     .into_parts()
///     .0;
///
/// signer.sign(&mut req, None).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_signer() -> DefaultSigner {
    Signer::new(
        default_context(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    )
}

/// Create a client on the default context.
///
/// Unset fields in `config` are loaded from the `PAAPI_*` env vars.
#[cfg(feature = "default-context")]
pub fn default_client(config: Config) -> Result<Client> {
    let ctx = default_context();
    let config = config.from_env(&ctx);
    Client::from_config(ctx, &config)
}

#[cfg(all(test, feature = "default-context"))]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_default_client_explicit_config() -> Result<()> {
        let config = Config::new()
            .with_access_key_id("AKIDEXAMPLE")
            .with_secret_key("secret")
            .with_partner_tag("mytag")
            .with_endpoint("https://webservices.amazon.co.uk/onca/xml");

        let client = default_client(config)?;
        assert_eq!(client.endpoint(), "https://webservices.amazon.co.uk/onca/xml");

        let url = client.signed_url("ItemLookup", &ParameterSet::new())?;
        assert!(url.contains("&AssociateTag=mytag&"));
        Ok(())
    }

    #[test]
    fn test_default_client_invalid_endpoint() {
        let config = Config::new()
            .with_access_key_id("AKIDEXAMPLE")
            .with_secret_key("secret")
            .with_partner_tag("mytag")
            .with_endpoint("not a url");

        let err = default_client(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
