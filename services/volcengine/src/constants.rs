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

// Headers used in volcengine openapi.
pub const X_DATE: &str = "x-date";
pub const X_CONTENT_SHA256: &str = "x-content-sha256";

/// Headers covered by the signature, in canonical order.
pub const SIGNED_HEADERS: &str = "host;x-content-sha256;x-date";

/// Algorithm tag leading both the string to sign and the authorization header.
pub const ALGORITHM: &str = "HMAC-SHA256";

/// Last component of the credential scope and of the signing key ladder.
pub const TERMINATOR: &str = "request";

// Env values used in volcengine services.
pub const VOLC_ACCESSKEY: &str = "VOLC_ACCESSKEY";
pub const VOLC_SECRETKEY: &str = "VOLC_SECRETKEY";
pub const VOLC_REGION: &str = "VOLC_REGION";
pub const VOLC_HOST: &str = "VOLC_HOST";

// Deployment defaults.
pub const DEFAULT_HOST: &str = "open.volcengineapi.com";
pub const DEFAULT_REGION: &str = "cn-beijing";
pub const DEFAULT_SERVICE: &str = "ark";

/// AsciiSet for query encoding.
///
/// Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// A space becomes `%20` and a literal `+` becomes `%2B`.
pub static VOLC_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
