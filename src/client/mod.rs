// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote service boundary.
//!
//! `POST /analyze` and `GET /history` against the ambiguity-analysis
//! service, plus an offline stand-in (`--demo`) so the UI runs without a
//! network. Failures never propagate past the caller of these methods; the
//! session and history layers decide what a failure means.

pub mod demo;

pub use demo::DemoService;

use std::fmt;

use serde::Serialize;

use crate::model::{AnalysisResult, HistoryEntry};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// The analysis service a session talks to.
#[derive(Debug, Clone)]
pub enum AnalysisService {
    Http(HttpService),
    Demo(DemoService),
}

impl AnalysisService {
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::Http(HttpService::new(base_url))
    }

    pub fn demo() -> Self {
        Self::Demo(DemoService::default())
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, ServiceError> {
        match self {
            Self::Http(service) => service.analyze(text).await,
            Self::Demo(service) => service.analyze(text).await,
        }
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        match self {
            Self::Http(service) => service.history().await,
            Self::Demo(service) => service.history().await,
        }
    }
}

/// HTTP client for the remote service.
///
/// One long-lived `reqwest::Client`; no timeout beyond the service's own
/// behavior, no retries, no cancellation of in-flight requests — superseded
/// responses are discarded by the session's ticket check, not aborted here.
#[derive(Debug, Clone)]
pub struct HttpService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client: reqwest::Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, ServiceError> {
        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(ServiceError::Http)?;
        decode(response).await
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        let response = self
            .client
            .get(format!("{}/history", self.base_url))
            .send()
            .await
            .map_err(ServiceError::Http)?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status { status: status.as_u16() });
    }

    let body = response.text().await.map_err(ServiceError::Http)?;
    serde_json::from_str(&body).map_err(ServiceError::Decode)
}

#[derive(Debug)]
pub enum ServiceError {
    Http(reqwest::Error),
    Status { status: u16 },
    Decode(serde_json::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { status } => write!(f, "service returned status {status}"),
            Self::Decode(err) => write!(f, "malformed service response: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::{AnalyzeRequest, HttpService};

    #[test]
    fn analyze_request_serializes_text_only() {
        let body = serde_json::to_string(&AnalyzeRequest { text: "The bank is closed" })
            .expect("serialize request");
        assert_eq!(body, r#"{"text":"The bank is closed"}"#);
    }

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        let service = HttpService::new("http://localhost:8000///");
        assert_eq!(service.base_url(), "http://localhost:8000");
    }
}
