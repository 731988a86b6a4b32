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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Service endpoint.
/// Default host of the service.
pub const API_HOST: &str = "webservices.amazon.com";
/// Default request path.
pub const API_PATH: &str = "/onca/xml";
/// Default endpoint url.
pub const API_ENDPOINT: &str = "http://webservices.amazon.com/onca/xml";

// Fixed request fields.
/// Value of the `Service` parameter.
pub const SERVICE_NAME: &str = "AWSECommerceService";
/// Value of the `Version` parameter.
pub const API_VERSION: &str = "2011-08-01";

// Query parameter names injected into every request.
pub const PARAM_SERVICE: &str = "Service";
pub const PARAM_ASSOCIATE_TAG: &str = "AssociateTag";
pub const PARAM_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const PARAM_OPERATION: &str = "Operation";
pub const PARAM_VERSION: &str = "Version";
pub const PARAM_TIMESTAMP: &str = "Timestamp";
pub const PARAM_SIGNATURE: &str = "Signature";

// Env values used by the product advertising service.
/// Env name of the access key id.
pub const PAAPI_ACCESS_KEY_ID: &str = "PAAPI_ACCESS_KEY_ID";
/// Env name of the secret key.
pub const PAAPI_SECRET_KEY: &str = "PAAPI_SECRET_KEY";
/// Env name of the partner tag.
pub const PAAPI_PARTNER_TAG: &str = "PAAPI_PARTNER_TAG";
/// Env name of the endpoint override.
pub const PAAPI_ENDPOINT: &str = "PAAPI_ENDPOINT";

/// AsciiSet for the service's query encoding.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static PAAPI_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
