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

use std::fmt;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, HOST};
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;
use volcsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use volcsign_core::time::{format_date, format_iso8601, now, DateTime};
use volcsign_core::{Context, Error, Result, SignRequest, SigningCredential, SigningRequest};

use crate::constants::*;
use crate::{Config, Credential, SignableRequest};

/// RequestSigner that implements the Volcengine OpenAPI signature.
///
/// - [Signature method](https://www.volcengine.com/docs/6369/67269)
///
/// The signer holds no mutable state and can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
    host: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer for the given deployment scope.
    pub fn new(service: &str, region: &str, host: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            host: host.into(),

            time: None,
        }
    }

    /// Create a new request signer from the deployment scope in config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.service, &config.region, &config.host)
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Host bound into the canonical request.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the canonical form of the given request at the signing time.
    pub fn canonical_request(&self, req: &SignableRequest) -> CanonicalRequest {
        CanonicalRequest::new(
            req.method().clone(),
            req.path(),
            normalize_query(req.query()),
            req.content_sha256(),
            &self.host,
            self.time.unwrap_or_else(now),
        )
    }

    /// Compute the authentication headers for the given request.
    ///
    /// Headers are valid for exactly this request and only within the clock
    /// skew window the remote verifier accepts around `X-Date`.
    pub fn sign(&self, req: &SignableRequest, cred: &Credential) -> Result<SignedHeaders> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid("credential is not valid"));
        }

        Ok(self.sign_canonical_request(&self.canonical_request(req), cred))
    }

    fn credential_scope(&self, date: &str) -> String {
        format!("{date}/{}/{}/{TERMINATOR}", self.region, self.service)
    }

    fn sign_canonical_request(&self, creq: &CanonicalRequest, cred: &Credential) -> SignedHeaders {
        debug!("calculated canonical request: {creq}");

        // Scope: "20240101/<region>/<service>/request"
        let scope = self.credential_scope(creq.date());
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(creq.timestamp(), &scope, &creq.hashed());
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = SigningKey::derive(
            &cred.secret_access_key,
            creq.date(),
            &self.region,
            &self.service,
        );
        let signature = signing_key.sign(&string_to_sign);

        SignedHeaders {
            authorization: format!(
                "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
                cred.access_key_id
            ),
            host: creq.host.clone(),
            x_date: creq.timestamp.clone(),
            x_content_sha256: creq.content_sha256.clone(),
            credential_scope: scope,
            signature,
        }
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    /// Sign an already built request in place.
    ///
    /// The content hash is taken from the `X-Content-Sha256` header if the caller
    /// set one (see [`SignableRequest::into_http_request`]), otherwise the
    /// request is signed as having an empty body. The uri query is rewritten
    /// into its canonical encoding.
    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if !cred.is_valid() {
            return Err(Error::credential_invalid("credential is not valid"));
        }
        if req.method != Method::POST {
            return Err(Error::config_invalid(format!(
                "method {} is not supported, only POST can be signed",
                req.method
            )));
        }
        match req.uri.authority() {
            Some(authority) if authority.as_str() == self.host => {}
            Some(authority) => {
                return Err(Error::request_invalid(format!(
                    "request authority {authority} doesn't match signing host {}",
                    self.host
                )))
            }
            None => {
                return Err(Error::request_invalid(
                    "request without authority is invalid for signing",
                ))
            }
        }
        let content_sha256 = match req.headers.get(X_CONTENT_SHA256) {
            Some(v) => {
                let v = v.to_str()?;
                if !is_hex_sha256(v) {
                    return Err(Error::request_invalid(format!(
                        "{X_CONTENT_SHA256} {v:?} is not a lowercase hex sha256 digest"
                    )));
                }
                v.to_string()
            }
            None => hex_sha256(b""),
        };

        let mut signed_req = SigningRequest::build(req)?;
        signed_req.query = canonicalize_query(&signed_req.query);

        let creq = CanonicalRequest::new(
            signed_req.method.clone(),
            &signed_req.path,
            join_query(&signed_req.query),
            content_sha256,
            &self.host,
            self.time.unwrap_or_else(now),
        );
        let signed = self
            .sign_canonical_request(&creq, cred)
            .apply(&mut signed_req.headers);

        // Apply to the request, headers are left untouched if signing failed.
        signed_req.apply(req)?;
        signed
    }
}

fn is_hex_sha256(v: &str) -> bool {
    v.len() == 64 && v.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Sort query pairs by name and percent encode names and values.
///
/// The sort is stable and only looks at the name, so repeated parameters keep
/// the order they were given in.
fn canonicalize_query(query: &[(String, String)]) -> Vec<(String, String)> {
    let mut pairs = query.iter().collect::<Vec<_>>();
    pairs.sort_by(|(l, _), (r, _)| l.cmp(r));

    pairs
        .into_iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &VOLC_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &VOLC_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect()
}

fn join_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the normalized query string used both in the canonical request and on the wire.
///
/// ```
/// use volcsign_volcengine::normalize_query;
///
/// let query = vec![
///     ("Version".to_string(), "2024-01-01".to_string()),
///     ("Action".to_string(), "ListEndpoints".to_string()),
/// ];
/// assert_eq!(normalize_query(&query), "Action=ListEndpoints&Version=2024-01-01");
/// ```
pub fn normalize_query(query: &[(String, String)]) -> String {
    join_query(&canonicalize_query(query))
}

/// StringToSign:
///
/// ```text
/// HMAC-SHA256
/// 20240101T083015Z
/// 20240101/<region>/<service>/request
/// <hashed_canonical_request>
/// ```
fn string_to_sign(timestamp: &str, scope: &str, hashed_canonical_request: &str) -> String {
    let mut f = String::with_capacity(
        ALGORITHM.len() + timestamp.len() + scope.len() + hashed_canonical_request.len() + 3,
    );
    f.push_str(ALGORITHM);
    f.push('\n');
    f.push_str(timestamp);
    f.push('\n');
    f.push_str(scope);
    f.push('\n');
    f.push_str(hashed_canonical_request);
    f
}

/// Deterministic textual encoding of a request.
///
/// Its `Display` output is the canonical request string:
///
/// ```text
/// POST
/// /
/// Action=ListEndpoints&PageSize=100&Version=2024-01-01
/// host:open.volcengineapi.com
/// x-content-sha256:<content_sha256>
/// x-date:20240101T083015Z
///
/// host;x-content-sha256;x-date
/// <content_sha256>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    path: String,
    query: String,
    host: String,
    content_sha256: String,
    timestamp: String,
    date: String,
}

impl CanonicalRequest {
    fn new(
        method: Method,
        path: &str,
        query: String,
        content_sha256: String,
        host: &str,
        time: DateTime,
    ) -> Self {
        Self {
            method,
            path: path.to_string(),
            query,
            host: host.to_string(),
            content_sha256,
            timestamp: format_iso8601(time),
            date: format_date(time),
        }
    }

    /// Normalized query string, empty if the request has no query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lowercase hex SHA-256 of the payload.
    pub fn content_sha256(&self) -> &str {
        &self.content_sha256
    }

    /// Signing time as `YYYYMMDDTHHMMSSZ`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Signing date as `YYYYMMDD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Lowercase hex SHA-256 of the canonical request string.
    pub fn hashed(&self) -> String {
        hex_sha256(self.to_string().as_bytes())
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "host:{}", self.host)?;
        writeln!(f, "{X_CONTENT_SHA256}:{}", self.content_sha256)?;
        writeln!(f, "{X_DATE}:{}", self.timestamp)?;
        writeln!(f)?;
        writeln!(f, "{SIGNED_HEADERS}")?;
        f.write_str(&self.content_sha256)
    }
}

/// Signing key derived from the secret access key.
///
/// The secret is folded through HMAC-SHA256 with each scope component in
/// order: `date`, `region`, `service`, `request`. Every step is keyed by the
/// raw bytes of the previous one.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Derive the signing key for the given scope.
    pub fn derive(secret: &str, date: &str, region: &str, service: &str) -> Self {
        Self(derive_key(
            secret.as_bytes(),
            &[date, region, service, TERMINATOR],
        ))
    }

    /// Raw bytes of this key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Sign the string to sign, returns the lowercase hex signature.
    pub fn sign(&self, string_to_sign: &str) -> String {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

fn derive_key(secret: &[u8], components: &[&str]) -> Vec<u8> {
    components
        .iter()
        .fold(secret.to_vec(), |key, component| {
            hmac_sha256(&key, component.as_bytes())
        })
}

/// Authentication headers produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of `Host`.
    pub host: String,
    /// Value of `X-Date`.
    pub x_date: String,
    /// Value of `X-Content-Sha256`.
    pub x_content_sha256: String,
    /// `<date>/<region>/<service>/request`
    pub credential_scope: String,
    /// Lowercase hex signature.
    pub signature: String,
    /// Value of `Authorization`.
    pub authorization: String,
}

impl SignedHeaders {
    /// Insert all headers into the given map.
    ///
    /// Either all four headers are inserted or none of them. `Authorization`
    /// is marked as sensitive.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let host = HeaderValue::from_str(&self.host)?;
        let x_date = HeaderValue::from_str(&self.x_date)?;
        let x_content_sha256 = HeaderValue::from_str(&self.x_content_sha256)?;
        let mut authorization = HeaderValue::from_str(&self.authorization)?;
        authorization.set_sensitive(true);

        headers.insert(HOST, host);
        headers.insert(X_DATE, x_date);
        headers.insert(X_CONTENT_SHA256, x_content_sha256);
        headers.insert(AUTHORIZATION, authorization);
        Ok(())
    }

    /// Collect all headers into a new map.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(4);
        self.apply(&mut headers)?;
        Ok(headers)
    }
}
