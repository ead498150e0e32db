//! # Callback-slot adapter.
//!
//! Storage APIs often expose a request object with two callback slots,
//! `onsuccess` and `onerror`. [`to_deferred`] installs both slots and returns a
//! [`Pending`] future that settles when one of them fires.
//!
//! ## Flow
//! ```text
//! to_deferred(&mut conn, options)
//!     ├─ conn lacks a slot ──► Err(AdapterError::MissingCallbackSlots)   (synchronous)
//!     └─ install slots ──► Ok(Pending)
//!            onsuccess(v) ──► options.success(v, resolver) | resolver.resolve(v)
//!            onerror(e)   ──► options.error(e, resolver)   | resolver.reject(e)
//!
//! Pending resolves to:
//!     Ok(v)                       resolved
//!     Err(Rejection::Failed(e))   rejected
//!     Err(Rejection::Abandoned)   every resolver dropped unsettled
//! ```
//!
//! ## Example
//! ```rust
//! use rymd_utils::{to_deferred, AdapterOptions, Request};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut req: Request<&str, String> = Request::new();
//! let pending = to_deferred(&mut req, AdapterOptions::default()).unwrap();
//! req.succeed("row");
//! assert_eq!(pending.await, Ok("row"));
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::AdapterError;

/// A one-shot callback slot.
pub struct Slot<A> {
    callback: Option<Box<dyn FnOnce(A) + Send>>,
}

impl<A> Default for Slot<A> {
    fn default() -> Self {
        Self { callback: None }
    }
}

impl<A> fmt::Debug for Slot<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").field("set", &self.is_set()).finish()
    }
}

impl<A> Slot<A> {
    /// True if a callback is installed and not yet fired.
    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Installs `f`, replacing any previous callback.
    pub fn set(&mut self, f: impl FnOnce(A) + Send + 'static) {
        self.callback = Some(Box::new(f));
    }

    /// Fires the callback with `value`. Returns `false` if the slot was empty.
    pub fn fire(&mut self, value: A) -> bool {
        match self.callback.take() {
            Some(f) => {
                f(value);
                true
            }
            None => false,
        }
    }
}

/// Request objects exposing `onsuccess` / `onerror` slots.
///
/// Returning `None` from either accessor means the object does not support
/// that slot; [`to_deferred`] rejects such objects.
pub trait CallbackSlots {
    /// Value passed to `onsuccess`.
    type Output: Send + 'static;
    /// Value passed to `onerror`.
    type Failure: Send + 'static;

    fn onsuccess(&mut self) -> Option<&mut Slot<Self::Output>>;
    fn onerror(&mut self) -> Option<&mut Slot<Self::Failure>>;
}

/// Ready-made request with both slots.
pub struct Request<T, E> {
    onsuccess: Slot<T>,
    onerror: Slot<E>,
}

impl<T, E> Default for Request<T, E> {
    fn default() -> Self {
        Self {
            onsuccess: Slot::default(),
            onerror: Slot::default(),
        }
    }
}

impl<T, E> Request<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires `onsuccess`. Returns `false` if no callback was installed.
    pub fn succeed(&mut self, value: T) -> bool {
        self.onsuccess.fire(value)
    }

    /// Fires `onerror`. Returns `false` if no callback was installed.
    pub fn fail(&mut self, error: E) -> bool {
        self.onerror.fire(error)
    }
}

impl<T: Send + 'static, E: Send + 'static> CallbackSlots for Request<T, E> {
    type Output = T;
    type Failure = E;

    fn onsuccess(&mut self) -> Option<&mut Slot<T>> {
        Some(&mut self.onsuccess)
    }

    fn onerror(&mut self) -> Option<&mut Slot<E>> {
        Some(&mut self.onerror)
    }
}

/// Why a [`Pending`] did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection<E> {
    /// Rejected with the connection's (or custom handler's) error.
    Failed(E),
    /// Every [`Resolver`] was dropped without settling.
    Abandoned,
}

type Settle<T, E> = Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>;

/// Settles the paired [`Pending`]; only the first call has an effect.
pub struct Resolver<T, E> {
    tx: Settle<T, E>,
}

impl<T, E> Clone for Resolver<T, E> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T, E> Resolver<T, E> {
    fn settle(&self, outcome: Result<T, E>) -> bool {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match tx {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }

    /// Resolves with `value`. Returns `false` if already settled or nobody waits.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects with `error`. Returns `false` if already settled or nobody waits.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    pub fn is_settled(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

/// Custom slot handlers receiving the event value and the [`Resolver`].
pub struct AdapterOptions<T, E> {
    pub success: Option<Box<dyn FnOnce(T, Resolver<T, E>) + Send>>,
    pub error: Option<Box<dyn FnOnce(E, Resolver<T, E>) + Send>>,
}

impl<T, E> Default for AdapterOptions<T, E> {
    fn default() -> Self {
        Self {
            success: None,
            error: None,
        }
    }
}

/// Future returned by [`to_deferred`].
#[must_use = "futures do nothing unless awaited"]
pub struct Pending<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> Future for Pending<T, E> {
    type Output = Result<T, Rejection<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|settled| match settled {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(Rejection::Failed(error)),
            Err(_) => Err(Rejection::Abandoned),
        })
    }
}

/// Installs both callback slots of `conn` and returns the settling future.
///
/// # Errors
/// [`AdapterError::MissingCallbackSlots`] if `conn` lacks either slot.
pub fn to_deferred<C>(
    conn: &mut C,
    options: AdapterOptions<C::Output, C::Failure>,
) -> Result<Pending<C::Output, C::Failure>, AdapterError>
where
    C: CallbackSlots + ?Sized,
{
    if conn.onsuccess().is_none() || conn.onerror().is_none() {
        return Err(AdapterError::MissingCallbackSlots);
    }

    let (tx, rx) = oneshot::channel();
    let resolver = Resolver {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let AdapterOptions { success, error } = options;

    if let Some(slot) = conn.onsuccess() {
        let resolver = resolver.clone();
        slot.set(move |value| match success {
            Some(handler) => handler(value, resolver),
            None => {
                resolver.resolve(value);
            }
        });
    }

    if let Some(slot) = conn.onerror() {
        slot.set(move |failure| match error {
            Some(handler) => handler(failure, resolver),
            None => {
                resolver.reject(failure);
            }
        });
    }

    Ok(Pending { rx })
}
