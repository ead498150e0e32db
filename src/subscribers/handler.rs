//! # Event handler traits.
//!
//! Provides [`Handler`], the extension point invoked by
//! [`Emitter::publish`](crate::Emitter::publish), and [`AsyncHandler`] for
//! handlers whose whole body is asynchronous.
//!
//! ## Replies
//! A handler answers with a [`Reply`]:
//! - [`Reply::Done`]: the work is finished.
//! - [`Reply::Deferred`]: the work continues in a future. The emitter spawns it;
//!   if the future resolves to `Err` (or panics), the failure is published on
//!   `<event>Error`. A future resolving to `Ok` produces no event.
//!
//! A handler that returns `Err` or panics has its failure published on
//! `<event>Error` immediately, before `publish` returns.
//!
//! ## Example
//! ```rust
//! use rymd_utils::{args, Arg, Emitter, Handler, HandlerError, Reply};
//!
//! struct Validate;
//!
//! impl Handler for Validate {
//!     fn call(&self, _ctx: &Emitter, args: &[Arg]) -> Result<Reply, HandlerError> {
//!         match args.first().and_then(Arg::as_str) {
//!             Some(_) => Ok(Reply::Done),
//!             None => Err(HandlerError::fail("expected a string")),
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "validate" }
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::HandlerError;
use crate::events::{Arg, Emitter};

/// Future returned by a handler for work that settles later.
pub type DeferredReply = BoxFuture<'static, Result<(), HandlerError>>;

/// Outcome of a successful handler call.
pub enum Reply {
    /// Nothing left to do.
    Done,
    /// Work continues; only a failure of this future is observed.
    Deferred(DeferredReply),
}

impl Reply {
    /// Boxes `fut` into [`Reply::Deferred`].
    pub fn deferred<F>(fut: F) -> Self
    where
        F: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Reply::Deferred(Box::pin(fut))
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Done => f.write_str("Done"),
            Reply::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Synchronous event handler.
///
/// ### Implementation requirements
/// - Return quickly; `publish` waits for every handler.
/// - Put slow or async work in a [`Reply::Deferred`].
/// - Errors and panics are caught; they never reach the publisher.
pub trait Handler: Send + Sync + 'static {
    /// Handles one publish.
    ///
    /// `ctx` is the dispatch context: the explicit context given at subscribe
    /// time, or the subscribing emitter.
    fn call(&self, ctx: &Emitter, args: &[Arg]) -> Result<Reply, HandlerError>;

    /// Returns the handler name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Closure-backed handler.
pub struct HandlerFn<F> {
    name: &'static str,
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&Emitter, &[Arg]) -> Result<Reply, HandlerError> + Send + Sync + 'static,
{
    /// Wraps `f`, naming it after its type.
    pub fn new(f: F) -> Self {
        Self {
            name: std::any::type_name::<F>(),
            f,
        }
    }

    /// Wraps `f` under an explicit name.
    pub fn named(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Emitter, &[Arg]) -> Result<Reply, HandlerError> + Send + Sync + 'static,
{
    fn call(&self, ctx: &Emitter, args: &[Arg]) -> Result<Reply, HandlerError> {
        (self.f)(ctx, args)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Handler whose body is entirely asynchronous.
///
/// Each call is turned into a [`Reply::Deferred`]; the returned error, if
/// any, is published on `<event>Error`.
///
/// # Example
/// ```rust
/// use async_trait::async_trait;
/// use rymd_utils::{Arg, AsyncHandler, Emitter, HandlerError};
///
/// struct Upload;
///
/// #[async_trait]
/// impl AsyncHandler for Upload {
///     async fn call(&self, _ctx: Emitter, args: Vec<Arg>) -> Result<(), HandlerError> {
///         if args.is_empty() {
///             return Err(HandlerError::fail("nothing to upload"));
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncHandler: Send + Sync + 'static {
    /// Handles one publish asynchronously.
    async fn call(&self, ctx: Emitter, args: Vec<Arg>) -> Result<(), HandlerError>;

    /// Returns the handler name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Presents an [`AsyncHandler`] as a [`Handler`] returning deferred replies.
pub(crate) struct AsyncAdapter {
    inner: Arc<dyn AsyncHandler>,
}

impl AsyncAdapter {
    pub(crate) fn new(inner: Arc<dyn AsyncHandler>) -> Self {
        Self { inner }
    }
}

impl Handler for AsyncAdapter {
    fn call(&self, ctx: &Emitter, args: &[Arg]) -> Result<Reply, HandlerError> {
        let handler = Arc::clone(&self.inner);
        let ctx = ctx.clone();
        let args = args.to_vec();
        Ok(Reply::deferred(async move { handler.call(ctx, args).await }))
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_closure_reports_its_name() {
        let h = HandlerFn::named("probe", |_: &Emitter, _: &[Arg]| Ok(Reply::Done));
        assert_eq!(Handler::name(&h), "probe");
        assert!(matches!(h.call(&Emitter::new(), &[]), Ok(Reply::Done)));
    }

    #[test]
    fn async_adapter_defers() {
        struct Noop;

        #[async_trait]
        impl AsyncHandler for Noop {
            async fn call(&self, _: Emitter, _: Vec<Arg>) -> Result<(), HandlerError> {
                Ok(())
            }

            fn name(&self) -> &'static str {
                "noop"
            }
        }

        let adapter = AsyncAdapter::new(Arc::new(Noop));
        assert_eq!(Handler::name(&adapter), "noop");
        let reply = adapter.call(&Emitter::new(), &[]).unwrap();
        assert!(matches!(reply, Reply::Deferred(_)));
    }
}
