//! # LogWriter: traces every event
//!
//! A minimal handler meant for the `"all"` channel. It logs each event through
//! `tracing`: regular events at `info`, error-channel events at `warn`.
//!
//! ## Example output (with `tracing-subscriber` fmt)
//! ```text
//! INFO rymd_utils::subscribers::log: [event] emitter="library" event="saved" args=2
//! WARN rymd_utils::subscribers::log: [error] emitter="library" event="savedError" label="handler_failed" error: disk full
//! ```

use tracing::{info, warn};

use crate::error::HandlerError;
use crate::events::{ALL, Arg, Emitter};
use crate::subscribers::{Handler, Reply};

/// Event writer handler.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Subscribes a writer to the `"all"` channel of `emitter`.
    pub fn attach(emitter: &Emitter) {
        emitter.subscribe_handler(ALL, std::sync::Arc::new(Self::new()), None);
    }
}

impl Handler for LogWriter {
    fn call(&self, ctx: &Emitter, args: &[Arg]) -> Result<Reply, HandlerError> {
        // Under "all" the first argument is the event name.
        let (event, rest) = match args.split_first() {
            Some((first, rest)) => (first.as_str().unwrap_or("<unnamed>"), rest),
            None => ("<unnamed>", args),
        };

        match rest.iter().find_map(Arg::as_error) {
            Some(err) => warn!(
                emitter = ctx.label(),
                event,
                label = err.as_label(),
                "[error] {}",
                err.as_message()
            ),
            None => info!(emitter = ctx.label(), event, args = rest.len(), "[event]"),
        }
        Ok(Reply::Done)
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
