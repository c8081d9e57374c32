// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Result, ScError};
use crate::user_agent;
use attohttpc::{RequestBuilder, Response, Session};
use log::{debug, trace};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use serde::Deserialize;
use std::thread;
use std::time::Duration;

const GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_TIMEOUT: u64 = 30;
const MAX_RETRIES: usize = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Client for GitHub's release API.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    session: Session,
    base_url: String,
}

impl ReleaseClient {
    pub fn new() -> Self {
        let mut session = Session::new();
        session.header("User-Agent", user_agent::release_client());
        session.header("Accept", "application/vnd.github+json");
        session.timeout(Duration::from_secs(DEFAULT_TIMEOUT));
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            base_url: GITHUB_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self
    }

    /// Fetch the latest release of `repository` (`owner/name`).
    pub fn latest_release(&self, repository: &str) -> Result<Release> {
        let url = format!("{}/repos/{repository}/releases/latest", self.base_url);
        debug!("Fetching latest release from {url}");

        self.execute_with_retry(
            || self.session.get(&url),
            |response| {
                let body = response
                    .text()
                    .map_err(|e| ScError::Download(format!("Failed to read response body: {e}")))?;
                trace!("Release response: {body}");
                serde_json::from_str::<Release>(&body).map_err(|e| {
                    ScError::Download(format!("Invalid release response for {repository}: {e}"))
                })
            },
        )
    }

    /// Download `url` into memory.
    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {url}");
        self.execute_with_retry(
            || self.session.get(url),
            |response| {
                response
                    .bytes()
                    .map_err(|e| ScError::Download(format!("Failed to read {url}: {e}")))
            },
        )
    }

    fn execute_with_retry<T, F, P>(&self, request_builder: F, parser: P) -> Result<T>
    where
        F: Fn() -> RequestBuilder,
        P: Fn(Response) -> Result<T>,
    {
        let result = retry_with_index(
            Exponential::from_millis(INITIAL_BACKOFF_MS).take(MAX_RETRIES),
            |current_try| {
                let last_try = current_try >= (MAX_RETRIES - 1) as u64;
                let response = match request_builder().send() {
                    Ok(resp) => resp,
                    Err(e) => {
                        let error = ScError::Download(format!(
                            "Network error: {e}. Please check your internet connection and try again."
                        ));
                        if last_try {
                            return OperationResult::Err(error);
                        }
                        return OperationResult::Retry(error);
                    }
                };

                let status = response.status();
                if status == attohttpc::StatusCode::TOO_MANY_REQUESTS && !last_try {
                    if let Some(seconds) = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.parse::<u64>().ok())
                    {
                        thread::sleep(Duration::from_secs(seconds));
                    }
                    return OperationResult::Retry(ScError::Download(
                        "Too many requests. Waiting before retrying...".to_string(),
                    ));
                }

                if status.is_server_error() && !last_try {
                    return OperationResult::Retry(ScError::Download(format!(
                        "Server error ({})",
                        status.as_u16()
                    )));
                }

                if !response.is_success() {
                    let message = match status.as_u16() {
                        404 => "The requested release was not found".to_string(),
                        401 | 403 => "GitHub refused the request (rate limited or forbidden)"
                            .to_string(),
                        code => format!(
                            "HTTP error ({code}): {}",
                            status.canonical_reason().unwrap_or("Unknown error")
                        ),
                    };
                    return OperationResult::Err(ScError::Download(message));
                }

                match parser(response) {
                    Ok(value) => OperationResult::Ok(value),
                    Err(e) => OperationResult::Err(e),
                }
            },
        );

        result.map_err(|e| e.error)
    }
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_latest_release_parses_assets() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/repos/Daniil-SV/ScDowngrade/releases/latest")
            .match_header("user-agent", user_agent::release_client().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "v1.2",
                    "assets": [
                        {"name": "ScDowngrade.exe", "browser_download_url": "https://example.com/a.exe", "size": 10},
                        {"name": "source.zip", "browser_download_url": "https://example.com/s.zip"}
                    ]
                }"#,
            )
            .create();

        let client = ReleaseClient::new().with_base_url(server.url());
        let release = client.latest_release("Daniil-SV/ScDowngrade").unwrap();

        mock.assert();
        assert_eq!(release.tag_name, "v1.2");
        assert_eq!(release.assets.len(), 2);
        assert_eq!(release.assets[0].name, "ScDowngrade.exe");
        assert_eq!(release.assets[1].size, 0);
    }

    #[test]
    fn test_not_found_is_not_retried() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/repos/owner/missing/releases/latest")
            .with_status(404)
            .expect(1)
            .create();

        let client = ReleaseClient::new().with_base_url(server.url());
        let err = client.latest_release("owner/missing").unwrap_err();

        mock.assert();
        assert!(matches!(err, ScError::Download(message) if message.contains("not found")));
    }

    #[test]
    fn test_invalid_json_is_download_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/repos/owner/tool/releases/latest")
            .with_status(200)
            .with_body("not json")
            .create();

        let client = ReleaseClient::new().with_base_url(server.url());
        assert!(matches!(
            client.latest_release("owner/tool"),
            Err(ScError::Download(_))
        ));
    }

    #[test]
    fn test_download_returns_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/files/tool.exe")
            .with_status(200)
            .with_body(b"MZbinary")
            .create();

        let client = ReleaseClient::new();
        let bytes = client
            .download(&format!("{}/files/tool.exe", server.url()))
            .unwrap();
        assert_eq!(bytes, b"MZbinary");
    }
}
