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

//! Canonical query construction.

use crate::constants::PAAPI_QUERY_ENCODE_SET;
use crate::ParameterSet;
use percent_encoding::utf8_percent_encode;
use prodsign_core::{Error, Result};

/// Percent-encode a string for use in a query.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` becomes `%XX` with uppercase hex.
/// Space is `%20` and `~` is always left literal.
pub fn percent_encode(s: &str) -> String {
    let encoded = utf8_percent_encode(s, &PAAPI_QUERY_ENCODE_SET).to_string();
    if encoded.contains("%7E") {
        return encoded.replace("%7E", "~");
    }
    encoded
}

/// Turn parameters into encoded `key=value` pairs, preserving insertion order.
pub fn canonicalize(params: &ParameterSet) -> Result<Vec<String>> {
    params
        .iter()
        .map(|(k, v)| {
            if k.is_empty() {
                return Err(Error::invalid_parameter("parameter name must not be empty")
                    .with_context(format!("value: {v}")));
            }
            Ok(format!("{}={}", percent_encode(k), percent_encode(v)))
        })
        .collect()
}

/// Join a byte-order sorted copy of the pairs with `&`.
///
/// This is the canonical query used as signing input; the pairs themselves
/// are left in insertion order.
pub fn canonical_query(pairs: &[String]) -> String {
    let mut sorted = pairs.to_vec();
    sorted.sort();
    sorted.join("&")
}
