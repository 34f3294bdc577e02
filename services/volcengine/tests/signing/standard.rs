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

use http::header::AUTHORIZATION;
use http::header::HOST;
use http::Method;
use pretty_assertions::assert_eq;
use volcsign_core::{Context, ErrorKind, Result, SignRequest, Signer};
use volcsign_volcengine::constants::{X_CONTENT_SHA256, X_DATE};
use volcsign_volcengine::{list_endpoints_request, SignableRequest, StaticCredentialProvider};

use super::{fixture_credential, fixture_signer};

const EMPTY_BODY_AUTHORIZATION: &str = "HMAC-SHA256 Credential=AKTEST/20240101/cn-beijing/ark/request, SignedHeaders=host;x-content-sha256;x-date, Signature=6982bb76fcc33b473fd8059f2fddf6a15b4b58cd5301375569d97826dc9734d4";
const BODY_AUTHORIZATION: &str = "HMAC-SHA256 Credential=AKTEST/20240101/cn-beijing/ark/request, SignedHeaders=host;x-content-sha256;x-date, Signature=041f81c713e11337ad969b77535b57218aacb698d61ded143a32dcb1c83482c1";

#[test]
fn test_list_endpoints_without_body() -> Result<()> {
    let req = SignableRequest::new(Method::POST, "/")?
        .with_query("Action", "ListEndpoints")
        .with_query("PageSize", "100")
        .with_query("Version", "2024-01-01");

    let signed = fixture_signer().sign(&req, &fixture_credential())?;
    assert_eq!(signed.authorization, EMPTY_BODY_AUTHORIZATION);

    let headers = signed.to_header_map()?;
    assert_eq!(headers[HOST], "open.volcengineapi.com");
    assert_eq!(headers[X_DATE], "20240101T083015Z");
    assert_eq!(
        headers[X_CONTENT_SHA256],
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    Ok(())
}

#[test]
fn test_list_endpoints_with_body() -> Result<()> {
    let signed = fixture_signer().sign(&list_endpoints_request()?, &fixture_credential())?;

    assert_eq!(signed.authorization, BODY_AUTHORIZATION);
    assert_eq!(signed.signature.len(), 64);
    assert!(signed
        .signature
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    Ok(())
}

#[test]
fn test_canonical_request_binds_body_hash() -> Result<()> {
    let signer = fixture_signer();
    let creq = signer.canonical_request(&list_endpoints_request()?);

    let lines = creq.to_string();
    let lines = lines.split('\n').collect::<Vec<_>>();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "POST");
    assert_eq!(lines[1], "/");
    assert_eq!(lines[6], "");
    assert_eq!(lines[7], "host;x-content-sha256;x-date");
    assert_eq!(
        lines[4],
        format!("x-content-sha256:{}", creq.content_sha256())
    );
    assert_eq!(lines[8], creq.content_sha256());
    assert_eq!(
        creq.hashed(),
        "8f5d1e35023cda44eb9ebfcacc435750a1ad97b7c9c3486af9e7f5233f884aa9"
    );
    Ok(())
}

#[test]
fn test_path_is_signed_verbatim() -> Result<()> {
    let signer = fixture_signer();

    let plain = signer.canonical_request(&SignableRequest::post("/a/b"));
    let dotted = signer.canonical_request(&SignableRequest::post("/a/./b"));
    assert_ne!(plain.hashed(), dotted.hashed());
    assert!(dotted.to_string().starts_with("POST\n/a/./b\n"));
    Ok(())
}

#[tokio::test]
async fn test_signer_signs_http_request() -> Result<()> {
    let signer = Signer::load(
        Context::new(),
        StaticCredentialProvider::new("AKTEST", "secret")?,
        fixture_signer(),
    )
    .await?;

    let (mut parts, body) = list_endpoints_request()?
        .into_http_request("open.volcengineapi.com")?
        .into_parts();
    signer.sign(&mut parts).await?;

    assert_eq!(parts.headers[AUTHORIZATION], BODY_AUTHORIZATION);
    assert!(parts.headers[AUTHORIZATION].is_sensitive());
    assert_eq!(body.as_ref(), br#"{"Filter":{"Statuses":["Running"]}}"#);
    Ok(())
}

#[tokio::test]
async fn test_signer_rejects_other_methods() -> Result<()> {
    let (mut parts, _) = http::Request::builder()
        .method(Method::PUT)
        .uri("https://open.volcengineapi.com/?Action=ListEndpoints")
        .body(())?
        .into_parts();

    let err = fixture_signer()
        .sign_request(&Context::new(), &mut parts, Some(&fixture_credential()))
        .await
        .expect_err("PUT must be rejected");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(parts.headers.get(AUTHORIZATION).is_none());
    Ok(())
}

#[tokio::test]
async fn test_signer_load_without_credential() {
    let err = Signer::load(
        Context::new(),
        volcsign_volcengine::EnvCredentialProvider::new(),
        fixture_signer(),
    )
    .await
    .expect_err("no credential must fail at construction");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}
