//! # Emitter: per-object handler registry with failure interception.
//!
//! [`Emitter`] is the event-capable entity. It owns a registry mapping event
//! names to ordered subscriptions and dispatches synchronously on
//! [`Emitter::publish`].
//!
//! ## Dispatch
//! ```text
//! publish("save", args)
//!     ├─► snapshot registry["save"] and registry["all"] (lock released)
//!     ├─► for sub in registry["save"]:  sub.call(ctx, args)
//!     └─► for sub in registry["all"]:   sub.call(ctx, ["save", ...args])
//!
//! sub.call(..)
//!     ├─ Ok(Reply::Done)         ─► nothing
//!     ├─ Ok(Reply::Deferred(f))  ─► spawn f; on Err ─► ctx.publish("saveError", [err])
//!     ├─ Err(err)                ─► ctx.publish("saveError", [err])
//!     └─ panic                   ─► caught ─► ctx.publish("saveError", [Panicked])
//! ```
//!
//! ## Rules
//! - Registration order defines dispatch order within one event name.
//! - Exact-name subscribers run before `"all"` subscribers.
//! - `publish` never fails and never propagates a subscriber failure.
//! - The registry lock is never held while a handler runs, so handlers may
//!   publish or subscribe re-entrantly on any emitter.
//! - There is no unsubscribe; the registry only grows.
//!
//! ## Bubbling
//! ```text
//!   source.publish("save", [v])
//!        └─► relay (registered on source, ctx = target)
//!               └─► target.publish("save", [v, transform?(), source])
//!
//!   source.publish("saveError", [e])
//!        └─► relay ─► target.publish("saveError", [e])
//! ```

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::FutureExt;
use tracing::{debug, trace, warn};

use crate::error::HandlerError;
use crate::events::{Arg, EmitterConfig};
use crate::subscribers::{AsyncAdapter, AsyncHandler, DeferredReply, Handler, HandlerFn, Reply};

/// Reserved event name whose subscribers observe every publish.
pub const ALL: &str = "all";

/// Suffix forming the derived error channel of an event.
pub const ERROR_SUFFIX: &str = "Error";

/// Returns the derived error channel name for `event` (`event + "Error"`).
///
/// # Example
/// ```
/// assert_eq!(rymd_utils::error_channel("save"), "saveError");
/// ```
#[inline]
pub fn error_channel(event: &str) -> String {
    format!("{event}{ERROR_SUFFIX}")
}

/// Number of trailing `"Error"` suffixes (`"aErrorError"` → 2).
fn error_depth(event: &str) -> usize {
    let mut depth = 0;
    let mut rest = event;
    while let Some(stripped) = rest.strip_suffix(ERROR_SUFFIX) {
        depth += 1;
        rest = stripped;
    }
    depth
}

/// One registered callback.
struct Subscription {
    handler: Arc<dyn Handler>,
    /// Explicit dispatch context; `None` means the subscribing emitter.
    context: Option<Emitter>,
}

type Registry = HashMap<String, Vec<Arc<Subscription>>>;

struct Inner {
    config: EmitterConfig,
    registry: Mutex<Registry>,
}

/// Event-capable entity: subscribe, publish and bubble.
///
/// Cheap to clone; clones share one registry (it is the same object).
///
/// ### Properties
/// - **Synchronous dispatch**: `publish` returns after every handler ran.
/// - **Failure interception**: handler errors and panics become `<event>Error` events.
/// - **Deferred replies**: futures returned by handlers are spawned; only their failures surface.
#[derive(Clone)]
pub struct Emitter {
    inner: Arc<Inner>,
}

/// Non-owning handle to an [`Emitter`].
#[derive(Clone)]
pub(crate) struct WeakEmitter {
    inner: Weak<Inner>,
}

impl WeakEmitter {
    pub(crate) fn upgrade(&self) -> Option<Emitter> {
        self.inner.upgrade().map(|inner| Emitter { inner })
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("label", &self.label())
            .field("id", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

impl Emitter {
    /// Creates an anonymous emitter with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an emitter with a label used in logs.
    #[must_use]
    pub fn named(label: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        Self::with_config(EmitterConfig {
            label: Some(label.into()),
            ..EmitterConfig::default()
        })
    }

    /// Creates an emitter with explicit configuration.
    ///
    /// The registry is allocated here, empty.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                registry: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.inner.config.label.as_deref()
    }

    /// Returns this emitter's configuration.
    pub fn config(&self) -> &EmitterConfig {
        &self.inner.config
    }

    /// True if both handles refer to the same emitter.
    #[inline]
    pub fn ptr_eq(&self, other: &Emitter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakEmitter {
        WeakEmitter {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Number of subscriptions registered under `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry().get(event).map_or(0, Vec::len)
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // Handlers never run under the lock, a poisoned map is still consistent.
        self.inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ---- subscribe ----

    /// Subscribes a closure to `event`; the dispatch context is this emitter.
    ///
    /// Subscribing the same closure twice registers it twice.
    ///
    /// # Example
    /// ```
    /// use rymd_utils::{args, Emitter, Reply};
    ///
    /// let e = Emitter::new();
    /// e.subscribe("ping", |_ctx, args| {
    ///     assert_eq!(args[0].as_str(), Some("pong"));
    ///     Ok(Reply::Done)
    /// })
    /// .publish("ping", args!["pong"]);
    /// ```
    pub fn subscribe<F>(&self, event: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&Emitter, &[Arg]) -> Result<Reply, HandlerError> + Send + Sync + 'static,
    {
        self.subscribe_handler(event, Arc::new(HandlerFn::new(f)), None)
    }

    /// Subscribes a closure to `event` with an explicit dispatch context.
    ///
    /// The closure receives `context` as its receiver, and failures are
    /// re-published on `context` rather than on this emitter.
    pub fn subscribe_with<F>(&self, event: impl Into<String>, f: F, context: &Emitter) -> &Self
    where
        F: Fn(&Emitter, &[Arg]) -> Result<Reply, HandlerError> + Send + Sync + 'static,
    {
        self.subscribe_handler(event, Arc::new(HandlerFn::new(f)), Some(context))
    }

    /// Subscribes an async handler; its future is the deferred reply.
    pub fn subscribe_async(
        &self,
        event: impl Into<String>,
        handler: Arc<dyn AsyncHandler>,
        context: Option<&Emitter>,
    ) -> &Self {
        self.subscribe_handler(event, Arc::new(AsyncAdapter::new(handler)), context)
    }

    /// Subscribes a [`Handler`] trait object.
    pub fn subscribe_handler(
        &self,
        event: impl Into<String>,
        handler: Arc<dyn Handler>,
        context: Option<&Emitter>,
    ) -> &Self {
        let event = event.into();
        trace!(
            emitter = self.label(),
            event = %event,
            handler = handler.name(),
            "subscribed"
        );
        let sub = Arc::new(Subscription {
            handler,
            context: context.cloned(),
        });
        self.registry().entry(event).or_default().push(sub);
        self
    }

    // ---- publish ----

    /// Publishes `event` with `args`.
    ///
    /// Exact-name subscribers receive `args`; `"all"` subscribers receive
    /// `[event, ...args]`. Handler failures are redirected to `<event>Error`
    /// on each subscription's dispatch context.
    pub fn publish(&self, event: &str, args: Vec<Arg>) -> &Self {
        let (exact, all) = {
            let registry = self.registry();
            (registry.get(event).cloned(), registry.get(ALL).cloned())
        };

        if let Some(subs) = exact {
            for sub in &subs {
                self.dispatch(event, sub, &args);
            }
        }

        if let Some(subs) = all {
            let mut full = Vec::with_capacity(args.len() + 1);
            full.push(Arg::from(event));
            full.extend(args);
            for sub in &subs {
                self.dispatch(event, sub, &full);
            }
        }

        self
    }

    fn dispatch(&self, event: &str, sub: &Subscription, args: &[Arg]) {
        let ctx = sub.context.as_ref().unwrap_or(self);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sub.handler.call(ctx, args)))
            .unwrap_or_else(|payload| Err(HandlerError::from_panic(payload)));

        match outcome {
            Ok(Reply::Done) => {}
            Ok(Reply::Deferred(fut)) => ctx.watch_deferred(event, sub.handler.name(), fut),
            Err(err) => {
                debug!(
                    emitter = ctx.label(),
                    event,
                    handler = sub.handler.name(),
                    label = err.as_label(),
                    "handler failed"
                );
                ctx.report_failure(event, err);
            }
        }
    }

    /// Drives a deferred reply; its failure is published on `<event>Error`.
    fn watch_deferred(&self, event: &str, handler: &'static str, fut: DeferredReply) {
        let Some(runtime) = self.inner.config.runtime_handle() else {
            warn!(emitter = self.label(), event, handler, "deferred reply without runtime");
            self.report_failure(event, HandlerError::NoRuntime);
            return;
        };

        let ctx = self.clone();
        let event = event.to_owned();
        runtime.spawn(async move {
            let settled = AssertUnwindSafe(fut)
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(HandlerError::from_panic(payload)));
            if let Err(err) = settled {
                debug!(
                    emitter = ctx.label(),
                    event = %event,
                    handler,
                    label = err.as_label(),
                    "deferred reply rejected"
                );
                ctx.report_failure(&event, err);
            }
        });
    }

    fn report_failure(&self, event: &str, err: HandlerError) {
        if error_depth(event) >= self.inner.config.max_error_depth {
            warn!(
                emitter = self.label(),
                event,
                error = %err,
                "error channel nesting limit reached; dropping failure"
            );
            return;
        }

        let channel = error_channel(event);
        if self.listener_count(&channel) == 0 && self.listener_count(ALL) == 0 {
            debug!(emitter = self.label(), channel = %channel, "unhandled failure");
        }
        self.publish(&channel, vec![Arg::Error(err)]);
    }

    // ---- bubble ----

    /// Re-publishes everything `source` publishes under `event` on this emitter.
    ///
    /// Registers two subscriptions on `source` (context = `self`):
    /// - `event`: publishes `event` here with `[...args, source]`;
    /// - `event + "Error"`: forwards the error arguments unchanged.
    pub fn bubble(&self, event: &str, source: &Emitter) -> &Self {
        self.bubble_inner(event, source, None)
    }

    /// Like [`bubble`](Self::bubble), additionally appending `transform(self)`
    /// before the source handle.
    pub fn bubble_with<F>(&self, event: &str, source: &Emitter, transform: F) -> &Self
    where
        F: Fn(&Emitter) -> Arg + Send + Sync + 'static,
    {
        self.bubble_inner(event, source, Some(Arc::new(transform)))
    }

    fn bubble_inner(
        &self,
        event: &str,
        source: &Emitter,
        transform: Option<Arc<dyn Fn(&Emitter) -> Arg + Send + Sync>>,
    ) -> &Self {
        // The relay lives in source's registry; a strong handle would be a cycle.
        let origin = source.downgrade();
        let name = event.to_owned();
        let relay = HandlerFn::named("bubble", move |ctx: &Emitter, args: &[Arg]| {
            let mut forwarded = Vec::with_capacity(args.len() + 2);
            forwarded.extend_from_slice(args);
            if let Some(transform) = &transform {
                forwarded.push(transform(ctx));
            }
            if let Some(src) = origin.upgrade() {
                forwarded.push(Arg::Source(src));
            }
            ctx.publish(&name, forwarded);
            Ok(Reply::Done)
        });

        let channel = error_channel(event);
        let forwarded_channel = channel.clone();
        let error_relay = HandlerFn::named("bubble-error", move |ctx: &Emitter, args: &[Arg]| {
            ctx.publish(&forwarded_channel, args.to_vec());
            Ok(Reply::Done)
        });

        source.subscribe_handler(event, Arc::new(relay), Some(self));
        source.subscribe_handler(channel, Arc::new(error_relay), Some(self));
        self
    }
}
