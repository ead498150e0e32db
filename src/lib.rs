//! # rymd-utils
//!
//! **rymd-utils** is a small utility library built around an event mixin.
//!
//! Any object embedding an [`Emitter`] can subscribe, publish and *bubble*
//! events. Handler failures never reach the publisher: synchronous errors,
//! panics and rejected deferred replies are re-published on a derived
//! `<event>Error` channel. Around the event core sit helpers for binary data
//! (blobs, base64, data URLs, object URLs), HTTP requests, callback-slot
//! adapters, GUIDs and shallow merges.
//!
//! ## Architecture
//! ### Event flow
//! ```text
//!   photo.publish("saved", [v])
//!        │
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter (photo)                                                  │
//! │  - registry: name ──► [Subscription { handler, context }]         │
//! │  - dispatch: exact-name subscribers, then "all" subscribers       │
//! └──────┬──────────────────────┬──────────────────────┬──────────────┘
//!        ▼                      ▼                      ▼
//!   handler A              bubble relay            "all" handler
//!   Ok(Done)               (ctx = album)           receives ["saved", v]
//!   Err(e) ──► photo.publish("savedError", [e])
//!                               │
//!                               ▼
//!                  album.publish("saved", [v, photo])
//!                               │
//!                               ▼
//!                      album subscribers ...
//! ```
//!
//! ### Failure channels
//! ```text
//! handler(ctx, args)
//!   ├─ Ok(Reply::Done)            ─► nothing
//!   ├─ Ok(Reply::Deferred(fut))   ─► spawned on tokio
//!   │                                  └─ Err(e) ─► ctx.publish("<event>Error", [e])
//!   ├─ Err(e)                     ─► ctx.publish("<event>Error", [e])
//!   └─ panic                      ─► ctx.publish("<event>Error", [Panicked])
//!
//! failing "<event>Error" handler  ─► "<event>ErrorError" ... (capped by EmitterConfig::max_error_depth)
//! ```
//!
//! ## Features
//! | Area              | Description                                                          | Key types / functions                       |
//! |-------------------|----------------------------------------------------------------------|---------------------------------------------|
//! | **Events**        | Subscribe/publish/bubble with failure interception.                  | [`Emitter`], [`Evented`], [`Arg`]           |
//! | **Handlers**      | Sync handlers, deferred replies, async handlers.                     | [`Handler`], [`Reply`], [`AsyncHandler`]    |
//! | **Binary**        | Blob, base64, data URL, object URL, descriptor conversions.          | [`Blob`], [`ObjectUrlRegistry`]             |
//! | **Adapter**       | Callback-slot request objects as futures.                            | [`to_deferred`], [`Request`]                |
//! | **Transport**     | HTTP request settling on 200/404/500.                                | [`Transport`], [`RequestOptions`]           |
//! | **Errors**        | Typed errors with stable labels.                                     | [`HandlerError`], [`TransportError`]        |
//! | **Configuration** | Per-emitter settings.                                                | [`EmitterConfig`]                           |
//!
//! ## Optional features
//! - `transport` (default): exports [`Transport`] and [`request`] backed by `reqwest`.
//! - `logging`: exports [`LogWriter`], a handler that traces every event.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use rymd_utils::{args, Arg, Emitter, HandlerError, Reply};
//!
//! let library = Emitter::named("library");
//! let photo = Emitter::named("photo");
//! library.bubble("saved", &photo);
//!
//! let errors = Arc::new(Mutex::new(Vec::new()));
//! let sink = errors.clone();
//! library.subscribe("savedError", move |_ctx, args| {
//!     sink.lock().unwrap().push(args[0].clone());
//!     Ok(Reply::Done)
//! });
//!
//! // A failing handler on the photo surfaces on the library.
//! photo.subscribe("saved", |_ctx, _args| Err(HandlerError::fail("disk full")));
//! photo.publish("saved", args!["v1"]);
//!
//! assert_eq!(errors.lock().unwrap()[0], Arg::Error(HandlerError::fail("disk full")));
//! ```

mod adapter;
mod binary;
mod error;
mod events;
mod extend;
mod guid;
mod subscribers;

#[cfg(feature = "transport")]
mod transport;

// ---- Public re-exports ----

pub use adapter::{
    AdapterOptions, CallbackSlots, Pending, Rejection, Request, Resolver, Slot, to_deferred,
};
pub use binary::{
    Blob, BlobDescriptor, ObjectData, ObjectUrlRegistry, array_buffer_to_binary_string,
    array_buffer_to_blob, base64_to_bytes, blob_to_array_buffer, blob_to_data_url,
    blob_to_descriptor, bytes_to_base64, data_url_to_blob,
};
pub use error::{AdapterError, CodecError, HandlerError, TransportError};
pub use events::{
    ALL, Arg, DEFAULT_MAX_ERROR_DEPTH, ERROR_SUFFIX, Emitter, EmitterConfig, Evented,
    error_channel,
};
pub use extend::extend;
pub use guid::guid;
pub use subscribers::{AsyncHandler, DeferredReply, Handler, HandlerFn, Reply};

// Optional: HTTP helper.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "transport")]
pub use transport::{Payload, RequestOptions, ResponseType, Transport, request};

// Optional: expose a built-in handler that traces every event.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
