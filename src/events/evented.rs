//! # `Evented`: the event mixin.
//!
//! Any type that owns an [`Emitter`] gains `subscribe`, `publish` and `bubble`
//! by implementing [`Evented::emitter`]. Handlers receive the embedded emitter
//! as their dispatch context.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use rymd_utils::{args, Arg, Emitter, Evented, Reply};
//!
//! struct Photo { events: Emitter }
//! struct Album { events: Emitter }
//!
//! impl Evented for Photo { fn emitter(&self) -> &Emitter { &self.events } }
//! impl Evented for Album { fn emitter(&self) -> &Emitter { &self.events } }
//!
//! let photo = Photo { events: Emitter::named("photo") };
//! let album = Album { events: Emitter::named("album") };
//! album.bubble("saved", &photo);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! album.subscribe("saved", move |_ctx, args| {
//!     sink.lock().unwrap().extend_from_slice(args);
//!     Ok(Reply::Done)
//! });
//!
//! photo.publish("saved", args!["v1"]);
//! let seen = seen.lock().unwrap();
//! assert_eq!(seen[0].as_str(), Some("v1"));
//! assert!(seen[1].as_source().unwrap().ptr_eq(photo.emitter()));
//! ```

use crate::error::HandlerError;
use crate::events::{Arg, Emitter};
use crate::subscribers::Reply;

/// Grants publish/subscribe behaviour to any type exposing an [`Emitter`].
///
/// All provided methods return `&Self` for chaining.
pub trait Evented {
    /// The emitter backing this object.
    fn emitter(&self) -> &Emitter;

    /// See [`Emitter::subscribe`].
    fn subscribe<F>(&self, event: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&Emitter, &[Arg]) -> Result<Reply, HandlerError> + Send + Sync + 'static,
    {
        self.emitter().subscribe(event, f);
        self
    }

    /// See [`Emitter::subscribe_with`].
    fn subscribe_with<F, C>(&self, event: impl Into<String>, f: F, context: &C) -> &Self
    where
        F: Fn(&Emitter, &[Arg]) -> Result<Reply, HandlerError> + Send + Sync + 'static,
        C: Evented + ?Sized,
    {
        self.emitter().subscribe_with(event, f, context.emitter());
        self
    }

    /// See [`Emitter::publish`].
    fn publish(&self, event: &str, args: Vec<Arg>) -> &Self {
        self.emitter().publish(event, args);
        self
    }

    /// See [`Emitter::bubble`].
    fn bubble<S>(&self, event: &str, source: &S) -> &Self
    where
        S: Evented + ?Sized,
    {
        self.emitter().bubble(event, source.emitter());
        self
    }

    /// See [`Emitter::bubble_with`].
    fn bubble_with<S, F>(&self, event: &str, source: &S, transform: F) -> &Self
    where
        S: Evented + ?Sized,
        F: Fn(&Emitter) -> Arg + Send + Sync + 'static,
    {
        self.emitter().bubble_with(event, source.emitter(), transform);
        self
    }
}

impl Evented for Emitter {
    fn emitter(&self) -> &Emitter {
        self
    }
}
