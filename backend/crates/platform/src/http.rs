//! Outbound HTTP utilities
//!
//! Every upstream integration (emission estimators, narrative providers)
//! builds its `reqwest::Client` here so that all outbound calls carry a
//! deadline, and classifies failures through [`UpstreamError`].

use std::time::Duration;

use serde::de::DeserializeOwned;

/// Failure talking to an upstream service
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} did not respond in time")]
    Timeout {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} is unreachable")]
    Unreachable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with HTTP {status}: {detail}")]
    Status {
        service: &'static str,
        status: u16,
        detail: String,
    },

    #[error("{service} returned an unexpected payload")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn service(&self) -> &'static str {
        match self {
            Self::Timeout { service, .. }
            | Self::Unreachable { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. } => service,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    fn from_transport(service: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { service, source }
        } else if source.is_decode() {
            Self::Decode { service, source }
        } else {
            Self::Unreachable { service, source }
        }
    }
}

/// Client with a total per-request deadline
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

// Upstream error bodies can be large HTML pages.
const MAX_DETAIL_LEN: usize = 512;

/// Send `request` and decode a JSON body, mapping non-2xx to [`UpstreamError::Status`]
pub async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(|e| UpstreamError::from_transport(service, e))?;

    let status = response.status();
    if !status.is_success() {
        let mut detail = response.text().await.unwrap_or_default();
        truncate_on_char_boundary(&mut detail, MAX_DETAIL_LEN);
        tracing::warn!(service, status = status.as_u16(), "Upstream request rejected");
        return Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
            detail,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::from_transport(service, e))
}

fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
