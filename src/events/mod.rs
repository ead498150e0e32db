//! Events: emitter, mixin trait and argument model.
//!
//! This module groups the **registry/dispatch** logic ([`Emitter`]), the
//! **mixin** trait that grants it to user types ([`Evented`]), the
//! **argument** model ([`Arg`]) and the per-emitter configuration.
//!
//! ## Contents
//! - [`Emitter`] subscribe / publish / bubble with failure interception
//! - [`Evented`] blanket surface for any type embedding an `Emitter`
//! - [`Arg`] data, error and provenance arguments
//! - [`EmitterConfig`] label, error-nesting cap, runtime for deferred replies
//!
//! ## Channels
//! - `"all"` ([`ALL`]) observes every publish as `[event, ...args]`.
//! - `<event>Error` ([`error_channel`]) receives failures of `<event>` handlers.

mod arg;
mod config;
mod emitter;
mod evented;

pub use arg::Arg;
pub use config::{DEFAULT_MAX_ERROR_DEPTH, EmitterConfig};
pub use emitter::{ALL, ERROR_SUFFIX, Emitter, error_channel};
pub use evented::Evented;
