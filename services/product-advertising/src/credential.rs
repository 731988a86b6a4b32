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

use prodsign_core::utils::Redact;
use prodsign_core::{Error, Result, SigningCredential};
use std::fmt::{Debug, Formatter};

/// Credential that holds the access key id, secret key and partner tag.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Access key id sent as `AWSAccessKeyId`.
    pub access_key_id: String,
    /// Secret key used to compute the signature. Never sent.
    pub secret_key: String,
    /// Partner (associate) tag sent as `AssociateTag`.
    pub partner_tag: String,
}

impl Credential {
    /// Create a new credential, requiring every value to be non-empty.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
        partner_tag: impl Into<String>,
    ) -> Result<Self> {
        let cred = Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            partner_tag: partner_tag.into(),
        };

        for (field, value) in [
            ("access_key_id", &cred.access_key_id),
            ("secret_key", &cred.secret_key),
            ("partner_tag", &cred.partner_tag),
        ] {
            if value.is_empty() {
                return Err(Error::credential_invalid(format!("{field} is required")));
            }
        }

        Ok(cred)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("partner_tag", &self.partner_tag)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_key.is_empty() && !self.partner_tag.is_empty()
    }
}
