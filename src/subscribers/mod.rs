//! # Event handlers for the emitter.
//!
//! This module provides the [`Handler`] trait and its adapters, plus the
//! built-in [`LogWriter`] (feature `logging`).
//!
//! ## Architecture
//! ```text
//! Emitter::publish(event, args)
//!     ├──► Handler::call(ctx, args)          (HandlerFn, LogWriter, custom)
//!     │        ├─ Ok(Reply::Done)
//!     │        ├─ Ok(Reply::Deferred(fut)) ──► spawned; Err ──► <event>Error
//!     │        └─ Err(e) / panic ───────────────────────────► <event>Error
//!     │
//!     └──► AsyncAdapter ──► AsyncHandler::call(ctx, args).await  (always deferred)
//! ```
//!
//! ## Handler kinds
//! - **Closures**: `Emitter::subscribe(name, |ctx, args| ...)`, wrapped in [`HandlerFn`]
//! - **Trait objects**: `Emitter::subscribe_handler(name, Arc<dyn Handler>, ctx)`
//! - **Async**: `Emitter::subscribe_async(name, Arc<dyn AsyncHandler>, ctx)`

mod handler;
#[cfg(feature = "logging")]
mod log;

pub(crate) use handler::AsyncAdapter;
pub use handler::{AsyncHandler, DeferredReply, Handler, HandlerFn, Reply};
#[cfg(feature = "logging")]
pub use log::LogWriter;
