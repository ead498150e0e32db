//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the per-emitter settings.
//!
//! ## Sentinel values
//! - `runtime = None` → deferred replies run on the ambient tokio runtime
//!   (`Handle::try_current()` at dispatch time)
//! - `max_error_depth = 0` → failures are never re-published

use std::borrow::Cow;

use tokio::runtime::Handle;

/// Default cap on `"Error"` suffixes before a failure is dropped.
pub const DEFAULT_MAX_ERROR_DEPTH: usize = 32;

/// Settings for one [`Emitter`](crate::Emitter).
///
/// ## Field semantics
/// - `label`: name used in tracing output (`None` = anonymous)
/// - `max_error_depth`: a failure raised while handling an event whose name
///   already carries this many `"Error"` suffixes is logged and dropped
///   instead of widening to yet another `<event>Error` channel
/// - `runtime`: runtime driving deferred replies
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Label shown in logs.
    pub label: Option<Cow<'static, str>>,

    /// Maximum error-channel nesting (`fooErrorError...`).
    pub max_error_depth: usize,

    /// Explicit runtime for deferred replies.
    ///
    /// Set this when publishing from threads that are not inside a runtime.
    pub runtime: Option<Handle>,
}

impl EmitterConfig {
    /// Returns the runtime that should drive deferred replies, if any.
    ///
    /// - explicit `runtime` wins
    /// - otherwise the runtime of the calling thread
    #[inline]
    pub fn runtime_handle(&self) -> Option<Handle> {
        self.runtime.clone().or_else(|| Handle::try_current().ok())
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `label = None`
    /// - `max_error_depth = 32`
    /// - `runtime = None` (ambient)
    fn default() -> Self {
        Self {
            label: None,
            max_error_depth: DEFAULT_MAX_ERROR_DEPTH,
            runtime: None,
        }
    }
}
