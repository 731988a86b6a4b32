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

//! Product Advertising API signing and client for prodsign.
//!
//! Requests are authenticated with a signed query: the parameters are
//! percent-encoded, sorted, and signed with HMAC-SHA256 over
//! `GET\n<host>\n<path>\n<canonical query>`.
//!
//! ## Example
//!
//! ```no_run
//! use prodsign_core::{Context, Result};
//! use prodsign_product_advertising::{Client, Credential, ParameterSet, RequestSigner};
//!
//! # async fn example(ctx: Context) -> Result<()> {
//! let cred = Credential::new("AKIDEXAMPLE", "secret", "mytag-20")?;
//! let client = Client::new(ctx, RequestSigner::new(), cred);
//!
//! let params = ParameterSet::new()
//!     .with("ItemId", "B00008OE6I")
//!     .with("ResponseGroup", "ItemAttributes");
//! let doc = client.get("ItemLookup", &params).await?;
//! if let Some(title) = doc.find("Items/Item/ItemAttributes/Title") {
//!     println!("{}", title.text());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;
pub use constants::{API_ENDPOINT, API_HOST, API_PATH, API_VERSION, SERVICE_NAME};
pub use constants::{PAAPI_ACCESS_KEY_ID, PAAPI_ENDPOINT, PAAPI_PARTNER_TAG, PAAPI_SECRET_KEY};

pub mod canonical;

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod document;
pub use document::{Document, Element};

mod params;
pub use params::ParameterSet;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{signature, string_to_sign, Operation, RequestSigner, SignedQuery};
