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

use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for a query-signed request.
///
/// `query` holds decoded pairs after [`SigningRequest::build`]; whoever signs the
/// request replaces them with already encoded pairs before [`SigningRequest::apply`].
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters in the order they appear.
    pub query: Vec<(String, String)>,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::invalid_parameter("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Every pair is written as `key=value`, even when the value is empty.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        let query_size = self.query_size();

        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = if self.query.is_empty() {
                    self.path
                } else {
                    let mut s = self.path;
                    s.reserve(query_size + 2 * self.query.len());

                    s.push('?');
                    for (i, (k, v)) in self.query.iter().enumerate() {
                        if i > 0 {
                            s.push('&');
                        }

                        s.push_str(k);
                        s.push('=');
                        s.push_str(v);
                    }

                    s
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the host used in the string to sign.
    #[inline]
    pub fn host(&self) -> &str {
        self.authority.as_str()
    }

    /// Get query size.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri).body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_build_keeps_query_order() -> Result<()> {
        let mut req = parts("http://webservices.amazon.com/onca/xml?ItemId=B0&Keywords=a%20b&Empty=");
        let ctx = SigningRequest::build(&mut req)?;

        assert_eq!(ctx.host(), "webservices.amazon.com");
        assert_eq!(ctx.path, "/onca/xml");
        assert_eq!(ctx.scheme, Scheme::HTTP);
        assert_eq!(
            ctx.query,
            vec![
                ("ItemId".to_string(), "B0".to_string()),
                ("Keywords".to_string(), "a b".to_string()),
                ("Empty".to_string(), "".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_build_without_authority() {
        let mut req = parts("/onca/xml?ItemId=B0");
        assert!(SigningRequest::build(&mut req).is_err());
    }

    #[test]
    fn test_apply_writes_every_pair() -> Result<()> {
        let mut req = parts("http://webservices.amazon.com/onca/xml?x=1");
        let mut ctx = SigningRequest::build(&mut req)?;
        ctx.query = vec![
            ("B".to_string(), "2".to_string()),
            ("A".to_string(), "".to_string()),
            ("Signature".to_string(), "abc%2B".to_string()),
        ];
        ctx.apply(&mut req)?;

        assert_eq!(
            req.uri.to_string(),
            "http://webservices.amazon.com/onca/xml?B=2&A=&Signature=abc%2B"
        );
        Ok(())
    }
}
