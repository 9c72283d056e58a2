//! HTTP transport collaborator backed by [`reqwest`].

use std::time::Duration;

use tracing::debug;

use crate::error::TransportError;

use super::{FetchRequest, Transport};

/// Request timeout applied by the production transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches feeds over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<Vec<u8>, TransportError> {
        debug!(url = %request.url, "requesting feed");

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::from_status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(classify)?;
        Ok(body.to_vec())
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Unreachable(error.to_string())
    } else if let Some(status) = error.status() {
        TransportError::from_status(status.as_u16())
    } else {
        TransportError::Other(error.to_string())
    }
}
