//! Error types used by the event mixin, the transport helpers and the codecs.
//!
//! This module defines:
//!
//! - [`HandlerError`]: failures raised by event handlers (sync or deferred).
//! - [`TransportError`]: failures of the HTTP request helper.
//! - [`CodecError`]: malformed base64 / data URL input.
//! - [`AdapterError`]: contract violations of callback-slot connections.
//!
//! Every type provides `as_label` (stable snake_case, for logs) and `as_message`.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by event handlers.
///
/// A handler failure never reaches the publisher. The emitter catches it and
/// re-publishes it on the derived `<event>Error` channel, so the type is
/// [`Clone`] and travels as an [`Arg`](crate::Arg).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Handler returned an error (synchronously or from its deferred reply).
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Handler panicked; the panic was caught at the dispatch boundary.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// Handler returned a deferred reply but no tokio runtime was available to drive it.
    #[error("no tokio runtime available to drive a deferred reply")]
    NoRuntime,
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`] from anything printable.
    ///
    /// # Example
    /// ```
    /// use rymd_utils::HandlerError;
    ///
    /// let err = HandlerError::fail("boom");
    /// assert_eq!(err.to_string(), "handler failed: boom");
    /// ```
    pub fn fail(error: impl std::fmt::Display) -> Self {
        HandlerError::Failed {
            error: error.to_string(),
        }
    }

    /// Builds [`HandlerError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let info = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        HandlerError::Panicked { info }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use rymd_utils::HandlerError;
    ///
    /// assert_eq!(HandlerError::fail("x").as_label(), "handler_failed");
    /// assert_eq!(HandlerError::NoRuntime.as_label(), "handler_no_runtime");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::Panicked { .. } => "handler_panicked",
            HandlerError::NoRuntime => "handler_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { error } => format!("error: {error}"),
            HandlerError::Panicked { info } => format!("panic: {info}"),
            HandlerError::NoRuntime => "no runtime".to_string(),
        }
    }
}

/// # Errors produced by the HTTP request helper.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// Server answered with a failing status (404 or 500).
    #[error("request to {url} failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Request did not settle within the configured timeout.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// The configured timeout.
        timeout: Duration,
    },

    /// Connection-level failure (DNS, refused, reset...).
    #[error("network error: {error}")]
    Network {
        /// The underlying error message.
        error: String,
    },

    /// Body could not be decoded for the requested response type.
    #[error("failed to decode response body: {error}")]
    Decode {
        /// The underlying error message.
        error: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Status { .. } => "transport_status",
            TransportError::Timeout { .. } => "transport_timeout",
            TransportError::Network { .. } => "transport_network",
            TransportError::Decode { .. } => "transport_decode",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::Status { status, url } => format!("status {status} for {url}"),
            TransportError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            TransportError::Network { error } => format!("network: {error}"),
            TransportError::Decode { error } => format!("decode: {error}"),
        }
    }
}

/// # Errors produced by the binary codecs.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not valid base64 (after URL-safe normalization).
    #[error("invalid base64: {error}")]
    InvalidBase64 {
        /// The underlying decoder message.
        error: String,
    },

    /// Input is not a `data:` URL this module understands.
    #[error("invalid data URL: {reason}")]
    InvalidDataUrl {
        /// What is wrong with the input.
        reason: &'static str,
    },
}

impl CodecError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            CodecError::InvalidBase64 { .. } => "codec_invalid_base64",
            CodecError::InvalidDataUrl { .. } => "codec_invalid_data_url",
        }
    }
}

/// # Contract violations of the callback-slot adapter.
///
/// Raised synchronously: these are programming errors, not runtime conditions.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The connection lacks an `onsuccess` or `onerror` slot.
    #[error("connection must expose both onsuccess and onerror callback slots")]
    MissingCallbackSlots,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_rendered() {
        let err = HandlerError::from_panic(Box::new("static str"));
        assert_eq!(err, HandlerError::Panicked { info: "static str".into() });

        let err = HandlerError::from_panic(Box::new(String::from("owned")));
        assert_eq!(err.as_message(), "panic: owned");

        let err = HandlerError::from_panic(Box::new(42_u8));
        assert_eq!(err.as_label(), "handler_panicked");
    }

    #[test]
    fn transport_labels_are_stable() {
        let err = TransportError::Status {
            status: 404,
            url: "http://x/y".into(),
        };
        assert_eq!(err.as_label(), "transport_status");
        assert_eq!(err.as_message(), "status 404 for http://x/y");
    }
}
