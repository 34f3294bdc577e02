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

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::uri::PathAndQuery;
use http::HeaderValue;
use http::Method;
use http::Uri;
use serde::Serialize;
use volcsign_core::hash::hex_sha256;
use volcsign_core::{Error, Result};

use crate::constants::X_CONTENT_SHA256;
use crate::sign_request::normalize_query;

/// One outbound call to sign.
///
/// Holds the method, the path, the query parameters in the order they were
/// added and the exact payload bytes that will be hashed and sent.
///
/// ```
/// use serde_json::json;
/// use volcsign_volcengine::SignableRequest;
///
/// # fn main() -> volcsign_core::Result<()> {
/// let req = SignableRequest::post("/")
///     .with_query("Action", "ListEndpoints")
///     .with_query("Version", "2024-01-01")
///     .with_json(&json!({"Filter": {"Statuses": ["Running"]}}))?;
/// assert_eq!(req.payload().as_ref(), br#"{"Filter":{"Statuses":["Running"]}}"#);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    payload: Bytes,
    content_type: Option<&'static str>,
}

impl SignableRequest {
    /// Create a new request.
    ///
    /// Only `POST` is supported by this protocol. Any other method is a
    /// configuration mistake and is reported as
    /// [`ConfigInvalid`](volcsign_core::ErrorKind::ConfigInvalid).
    ///
    /// The path is used verbatim, `.` and `..` segments are not normalized.
    pub fn new(method: Method, path: impl Into<String>) -> Result<Self> {
        if method != Method::POST {
            return Err(Error::config_invalid(format!(
                "method {method} is not supported, only POST can be signed"
            )));
        }

        Ok(Self::post(path))
    }

    /// Create a new `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            payload: Bytes::new(),
            content_type: None,
        }
    }

    /// Add a query parameter.
    ///
    /// Adding the same name again repeats the parameter, values keep the order they were added in.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter with multiple values.
    pub fn with_query_values<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        self.query
            .extend(values.into_iter().map(|v| (name.clone(), v.into())));
        self
    }

    /// Set the body by serializing the given value into compact JSON.
    ///
    /// The serialized bytes are exactly the bytes that get hashed and sent.
    /// A value serializing to JSON `null` (for example `Option::None`) means
    /// no body: the payload stays empty and no `Content-Type` is set.
    /// A serialization failure is reported as
    /// [`RequestInvalid`](volcsign_core::ErrorKind::RequestInvalid).
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let bs = serde_json::to_vec(body).map_err(|e| {
            Error::request_invalid("failed to serialize request body as json").with_source(e)
        })?;

        if bs == b"null" {
            self.payload = Bytes::new();
            self.content_type = None;
        } else {
            self.payload = Bytes::from(bs);
            self.content_type = Some("application/json");
        }
        Ok(self)
    }

    /// Set raw payload bytes.
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self.content_type = None;
        self
    }

    /// HTTP method of this request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path of this request.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in the order they were added.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Payload bytes, empty if no body was set.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Lowercase hex SHA-256 of the payload.
    ///
    /// A request without body hashes the empty string.
    pub fn content_sha256(&self) -> String {
        hex_sha256(&self.payload)
    }

    /// Build the `http::Request` to send to `https://<host>`.
    ///
    /// The uri query uses the same encoding as the canonical request and the
    /// `X-Content-Sha256` header is set, so the request can be signed by
    /// [`RequestSigner`](crate::RequestSigner) through the
    /// [`SignRequest`](volcsign_core::SignRequest) trait.
    pub fn into_http_request(self, host: &str) -> Result<http::Request<Bytes>> {
        let query = normalize_query(&self.query);
        let paq = if query.is_empty() {
            self.path.parse::<PathAndQuery>()?
        } else {
            format!("{}?{}", self.path, query).parse::<PathAndQuery>()?
        };
        let uri = Uri::builder()
            .scheme("https")
            .authority(host)
            .path_and_query(paq)
            .build()?;

        let mut req = http::Request::builder()
            .method(self.method)
            .uri(uri)
            .header(
                X_CONTENT_SHA256,
                HeaderValue::from_str(&hex_sha256(&self.payload))?,
            );
        if let Some(v) = self.content_type {
            req = req.header(CONTENT_TYPE, HeaderValue::from_static(v));
        }

        Ok(req.body(self.payload)?)
    }
}
