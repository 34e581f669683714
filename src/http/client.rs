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

use crate::config::IsoListConfig;
use crate::error::{IsoListError, Result};
use crate::http::Fetcher;
use crate::user_agent;
use attohttpc::header::CONTENT_LENGTH;
use attohttpc::{RequestBuilder, Response, Session};
use log::{debug, trace};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use std::time::Duration;

const INITIAL_BACKOFF_MS: u64 = 500;
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Blocking fetcher over a shared attohttpc session.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    session: Session,
    retries: usize,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, retries: usize) -> Self {
        let mut session = Session::new();
        session.header("User-Agent", user_agent);
        session.header("Accept", ACCEPT);
        session.header("Accept-Language", ACCEPT_LANGUAGE);
        session.timeout(timeout);
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self { session, retries }
    }

    pub fn from_config(config: &IsoListConfig) -> Self {
        let agent = config
            .http
            .user_agent
            .clone()
            .unwrap_or_else(user_agent::scraper_client);
        Self::new(&agent, config.timeout(), config.http.retries)
    }

    /// Send the request, retrying connection-level failures only. A response
    /// with a non-success status is returned as `HttpStatus` right away.
    fn send_with_retry<F>(&self, url: &str, request_builder: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let result = retry_with_index(
            Exponential::from_millis(INITIAL_BACKOFF_MS).take(self.retries),
            |current_try| {
                trace!("Attempt {current_try} for {url}");
                let response = match request_builder().send() {
                    Ok(response) => response,
                    Err(e) => {
                        debug!("Attempt {current_try} for {url} failed: {e}");
                        return OperationResult::Retry(IsoListError::NetworkError(format!(
                            "Failed to fetch {url}: {e}"
                        )));
                    }
                };

                if !response.is_success() {
                    return OperationResult::Err(IsoListError::HttpStatus {
                        url: url.to_string(),
                        status: response.status().as_u16(),
                    });
                }

                OperationResult::Ok(response)
            },
        );

        result.map_err(|e| e.error)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let response = self.send_with_retry(url, || self.session.get(url))?;
        response
            .text()
            .map_err(|e| IsoListError::NetworkError(format!("Failed to read body of {url}: {e}")))
    }

    fn content_length(&self, url: &str) -> Result<Option<u64>> {
        debug!("HEAD {url}");
        let response = self.send_with_retry(url, || self.session.head(url))?;
        let length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        Ok(length)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
