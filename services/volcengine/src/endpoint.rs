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

//! Model endpoint listing for the `ark` service.

use log::debug;
use serde::{Deserialize, Serialize};
use volcsign_core::time::{parse_rfc3339, DateTime};
use volcsign_core::{Error, Result, Signer};

use crate::{Credential, SignableRequest};

const LIST_ENDPOINTS_ACTION: &str = "ListEndpoints";
const LIST_ENDPOINTS_VERSION: &str = "2024-01-01";
const LIST_ENDPOINTS_PAGE_SIZE: &str = "100";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListEndpointsRequest<'a> {
    filter: ListEndpointsFilter<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListEndpointsFilter<'a> {
    statuses: &'a [&'a str],
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ListEndpointsResponse {
    response_metadata: ResponseMetadata,
    result: Option<ListEndpointsResult>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ResponseMetadata {
    request_id: String,
    error: Option<ResponseError>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ResponseError {
    code: String,
    message: String,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ListEndpointsResult {
    items: Vec<Endpoint>,
}

/// A model endpoint deployed under the account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Endpoint {
    /// Endpoint id used to call the model.
    pub id: String,
    /// Display name of the endpoint.
    pub name: String,
    /// Model served by this endpoint.
    pub model_reference: ModelReference,
    /// Creation time in RFC3339, empty if the response didn't carry it.
    pub create_time: String,
}

/// Reference to the model behind an [`Endpoint`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModelReference {
    /// Foundation model and its version.
    pub foundation_model: FoundationModel,
}

/// Foundation model of a [`ModelReference`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FoundationModel {
    /// Model name, for example `doubao-pro-32k`.
    pub name: String,
    /// Model version, for example `240515`.
    pub model_version: String,
}

/// Normalized view of an endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Endpoint id.
    pub id: String,
    /// `<Name>/<ModelVersion>` of the foundation model.
    pub model: String,
}

impl Endpoint {
    /// Parse the creation time.
    ///
    /// Returns `None` if the response didn't carry it.
    pub fn created_at(&self) -> Result<Option<DateTime>> {
        if self.create_time.is_empty() {
            return Ok(None);
        }

        parse_rfc3339(&self.create_time).map(Some)
    }

    /// Normalize into [`ModelInfo`].
    pub fn to_model_info(&self) -> ModelInfo {
        let fm = &self.model_reference.foundation_model;
        ModelInfo {
            id: self.id.clone(),
            model: format!("{}/{}", fm.name, fm.model_version),
        }
    }
}

/// Build the `ListEndpoints` request for running endpoints.
pub fn list_endpoints_request() -> Result<SignableRequest> {
    SignableRequest::post("/")
        .with_query("Action", LIST_ENDPOINTS_ACTION)
        .with_query("PageSize", LIST_ENDPOINTS_PAGE_SIZE)
        .with_query("Version", LIST_ENDPOINTS_VERSION)
        .with_json(&ListEndpointsRequest {
            filter: ListEndpointsFilter {
                statuses: &["Running"],
            },
        })
}

/// List running model endpoints.
///
/// The request is signed by `signer` and sent to `https://<host>` through the
/// signer's context. Only one request is sent, failures are never retried.
///
/// `host` must be the host the signer's [`RequestSigner`](crate::RequestSigner)
/// was built with, pass the same [`Config::host`](crate::Config::host) to both.
/// A different host is rejected as
/// [`RequestInvalid`](volcsign_core::ErrorKind::RequestInvalid) before anything
/// is sent.
///
/// Wrap the returned future in a timeout to bound the network call, dropping
/// it cancels the request.
pub async fn list_endpoints(signer: &Signer<Credential>, host: &str) -> Result<Vec<Endpoint>> {
    let (mut parts, body) = list_endpoints_request()?
        .into_http_request(host)?
        .into_parts();
    signer.sign(&mut parts).await?;

    let resp = signer
        .context()
        .http_send_as_string(http::Request::from_parts(parts, body))
        .await?;
    let status = resp.status();
    let content = resp.into_body();

    if !status.is_success() {
        return Err(Error::unexpected(format!(
            "list endpoints failed with status {status}: {content}"
        )));
    }

    let resp: ListEndpointsResponse = serde_json::from_str(&content).map_err(|e| {
        Error::unexpected(format!("failed to parse list endpoints response: {content}"))
            .with_source(e)
    })?;
    if let Some(err) = resp.response_metadata.error {
        return Err(Error::unexpected(format!(
            "list endpoints failed with code {}: {}",
            err.code, err.message
        )));
    }

    let items = resp.result.map(|v| v.items).unwrap_or_default();
    debug!(
        "listed {} endpoints in request {}",
        items.len(),
        resp.response_metadata.request_id
    );
    Ok(items)
}

/// List running model endpoints normalized into [`ModelInfo`].
pub async fn list_models(signer: &Signer<Credential>, host: &str) -> Result<Vec<ModelInfo>> {
    Ok(list_endpoints(signer, host)
        .await?
        .iter()
        .map(Endpoint::to_model_info)
        .collect())
}
