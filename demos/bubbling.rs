//! # Example: bubbling
//!
//! Builds a small object graph and shows how events and failures travel up.
//!
//! Shows how to:
//! - Embed an [`Emitter`] in your own types through [`Evented`].
//! - Bubble child events onto a container, with the child appended as provenance.
//! - Observe handler failures (sync and deferred) on `<event>Error`.
//! - Trace everything with [`LogWriter`].
//!
//! ## Flow
//! ```text
//! photo.publish("saved") ──► relay ──► album.publish("saved", [.., photo])
//!                                          ├─► LogWriter ("all")
//!                                          └─► album "saved" handler
//! photo "saved" handler fails (deferred) ──► photo "savedError" ──► relay ──► album "savedError"
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example bubbling --features logging
//! ```

use std::time::Duration;

use rymd_utils::{Arg, Emitter, Evented, HandlerError, LogWriter, Reply, args, guid};
use tracing_subscriber::EnvFilter;

struct Photo {
    id: String,
    events: Emitter,
}

impl Evented for Photo {
    fn emitter(&self) -> &Emitter {
        &self.events
    }
}

struct Album {
    events: Emitter,
}

impl Evented for Album {
    fn emitter(&self) -> &Emitter {
        &self.events
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let album = Album {
        events: Emitter::named("album"),
    };
    LogWriter::attach(album.emitter());

    let photos: Vec<Photo> = (0..2)
        .map(|i| Photo {
            id: guid(),
            events: Emitter::named(if i == 0 { "photo-0" } else { "photo-1" }),
        })
        .collect();

    for photo in &photos {
        album.bubble("saved", photo);
    }

    album.subscribe("saved", |_ctx, args| {
        let origin = args.last().and_then(Arg::as_source).and_then(Emitter::label);
        println!("[album] saved from {origin:?} with {} args", args.len());
        Ok(Reply::Done)
    });
    album.subscribe("savedError", |_ctx, args| {
        println!("[album] failure: {:?}", args.first().and_then(Arg::as_error));
        Ok(Reply::Done)
    });

    // Second photo's storage rejects asynchronously.
    photos[1].subscribe("saved", |_ctx, _args| {
        Ok(Reply::deferred(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Err(HandlerError::fail("quota exceeded"))
        }))
    });

    for photo in &photos {
        photo.publish("saved", args![photo.id.as_str()]);
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
}
