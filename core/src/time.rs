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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO 8601 with separators: "2022-03-13T07:20:04Z"
///
/// Fractional seconds are dropped.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse time from RFC 3339: "2022-03-13T07:20:04Z"
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    Ok(chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| {
            Error::unexpected(format!("parse '{s}' into rfc3339 failed")).with_source(e)
        })?
        .with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap()
    }

    #[test]
    fn test_format_iso8601() {
        let t = test_time();
        assert_eq!("2022-03-01T08:12:34Z", format_iso8601(t));
    }

    #[test]
    fn test_format_iso8601_drops_fraction() {
        let t = test_time() + chrono::TimeDelta::milliseconds(987);
        assert_eq!("2022-03-01T08:12:34Z", format_iso8601(t));
    }

    #[test]
    fn test_parse_rfc3339() {
        let t = test_time();
        for v in ["2022-03-01T08:12:34Z", "2022-03-01T16:12:34+08:00"] {
            assert_eq!(t, parse_rfc3339(v).expect("must be valid time"));
        }
        assert!(parse_rfc3339("20220301T081234Z").is_err());
    }
}
