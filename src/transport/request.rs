//! # HTTP request helper.
//!
//! [`Transport::request`] performs one request and settles by status:
//!
//! ```text
//! send ──► 200        ──► Ok(Payload)  (decoded per ResponseType)
//!      ──► 404 | 500  ──► Err(TransportError::Status)
//!      ──► other      ──► never settles (bounded only by `options.timeout`)
//!      ──► I/O error  ──► Err(TransportError::Network | Timeout)
//! ```
//!
//! Statuses other than 200/404/500 leave the future pending on purpose; set
//! [`RequestOptions::timeout`] to bound it.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::binary::Blob;
use crate::error::TransportError;

/// How the body of a successful response is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Parsed as JSON (`application/json`).
    #[default]
    Json,
    /// Wrapped in a [`Blob`] typed from `Content-Type`.
    Blob,
    /// UTF-8 text.
    Text,
    /// Raw bytes.
    ArrayBuffer,
}

/// Per-request options.
///
/// ## Field semantics
/// - `method`: HTTP method (default `GET`)
/// - `response_type`: body decoding (default [`ResponseType::Json`])
/// - `timeout`: bound on the whole request, including unsettled statuses (`None` = unbounded)
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub response_type: ResponseType,
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            response_type: ResponseType::Json,
            timeout: None,
        }
    }
}

impl RequestOptions {
    /// Default options with a different response type.
    pub fn with_response_type(response_type: ResponseType) -> Self {
        Self {
            response_type,
            ..Self::default()
        }
    }
}

/// Decoded body of a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Blob(Blob),
    Text(String),
    Bytes(Vec<u8>),
}

/// Cloneable request helper around a shared [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct Transport {
    client: Client,
}

static DEFAULT_TRANSPORT: LazyLock<Transport> = LazyLock::new(Transport::new);

/// Performs a request with the process-wide default [`Transport`].
pub async fn request(url: &str, options: &RequestOptions) -> Result<Payload, TransportError> {
    DEFAULT_TRANSPORT.request(url, options).await
}

impl Transport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing client (proxies, TLS settings, default headers...).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Performs one request; see the module docs for settlement rules.
    pub async fn request(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Payload, TransportError> {
        let settle = self.settle(url, options);
        match options.timeout {
            Some(timeout) => tokio::time::timeout(timeout, settle)
                .await
                .map_err(|_| TransportError::Timeout { timeout })?,
            None => settle.await,
        }
    }

    async fn settle(&self, url: &str, options: &RequestOptions) -> Result<Payload, TransportError> {
        let response = self
            .client
            .request(options.method.clone(), url)
            .send()
            .await
            .map_err(|e| classify(e, options))?;

        let status = response.status().as_u16();
        debug!(url, status, "response received");
        match status {
            200 => decode(response, options.response_type).await,
            404 | 500 => Err(TransportError::Status {
                status,
                url: url.to_owned(),
            }),
            other => {
                warn!(url, status = other, "status neither 200, 404 nor 500; request left unsettled");
                std::future::pending().await
            }
        }
    }
}

fn classify(err: reqwest::Error, options: &RequestOptions) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            timeout: options.timeout.unwrap_or_default(),
        }
    } else {
        TransportError::Network {
            error: err.to_string(),
        }
    }
}

async fn decode(response: Response, kind: ResponseType) -> Result<Payload, TransportError> {
    let mime = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let body = response.bytes().await.map_err(|e| TransportError::Network {
        error: e.to_string(),
    })?;

    match kind {
        ResponseType::Json => serde_json::from_slice(&body)
            .map(Payload::Json)
            .map_err(|e| TransportError::Decode {
                error: e.to_string(),
            }),
        ResponseType::Blob => Ok(Payload::Blob(Blob::with_type(body.to_vec(), &mime))),
        ResponseType::Text => String::from_utf8(body.to_vec())
            .map(Payload::Text)
            .map_err(|e| TransportError::Decode {
                error: e.to_string(),
            }),
        ResponseType::ArrayBuffer => Ok(Payload::Bytes(body.to_vec())),
    }
}
