//! HTTP transport (feature `transport`).
//!
//! ## Contents
//! - [`Transport`] request helper over a shared `reqwest::Client`
//! - [`request`] same, using a process-wide default transport
//! - [`RequestOptions`], [`ResponseType`], [`Payload`]

mod request;

pub use request::{Payload, RequestOptions, ResponseType, Transport, request};
