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

use prodsign_core::{Error, Result};
use serde_json::{Map, Value};

/// Ordered set of request parameters.
///
/// Iteration follows insertion order. Inserting a key that already exists
/// replaces its value and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the previous value for this key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Insert a parameter and return self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a parameter and return its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(idx).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse one command line argument of the form `key=value`.
    ///
    /// The value may be empty and may itself contain `=`.
    pub fn parse_pair(arg: &str) -> Result<(String, String)> {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            Error::invalid_parameter("parameter must be of the form key=value")
                .with_context(format!("argument: {arg}"))
        })?;
        if key.is_empty() {
            return Err(Error::invalid_parameter("parameter name must not be empty")
                .with_context(format!("argument: {arg}")));
        }

        Ok((key.to_string(), value.to_string()))
    }

    /// Build a parameter set from `key=value` arguments.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for arg in args {
            let (k, v) = Self::parse_pair(arg.as_ref())?;
            params.insert(k, v);
        }
        Ok(params)
    }

    /// Build a parameter set from a JSON object.
    ///
    /// Strings are used as is, numbers and booleans by their JSON text.
    /// `null`, arrays and objects have no string form and are rejected.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self> {
        let mut params = Self::new();
        for (k, v) in map {
            let value = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(Error::invalid_parameter(
                        "parameter value is not representable as a string",
                    )
                    .with_context(format!("key: {k}")));
                }
            };
            params.insert(k.clone(), value);
        }
        Ok(params)
    }

    /// Build a parameter set from a JSON value, which must be an object.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            _ => Err(Error::invalid_parameter("parameters must be a JSON object")),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterSet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
