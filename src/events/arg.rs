//! # Event arguments.
//!
//! Publish calls carry a list of [`Arg`] values. Most arguments are plain data
//! (`serde_json::Value`); failures travel as [`HandlerError`] on `<event>Error`
//! channels, and bubbling appends the originating [`Emitter`] so listeners can
//! recover provenance.
//!
//! ## Example
//! ```rust
//! use rymd_utils::{args, Arg};
//!
//! let list = args!["saved", 3, true];
//! assert_eq!(list[0].as_str(), Some("saved"));
//! assert_eq!(list[1].as_data(), Some(&serde_json::json!(3)));
//! ```

use serde_json::Value;

use crate::error::HandlerError;
use crate::events::Emitter;

/// A single argument of a publish call.
#[derive(Clone, Debug)]
pub enum Arg {
    /// Plain data.
    Data(Value),
    /// A handler failure (published on `<event>Error`).
    Error(HandlerError),
    /// An emitter handle (appended by bubbling as provenance).
    Source(Emitter),
}

impl Arg {
    /// Returns the string if this is a `Data` string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Data(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Arg::Data(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&HandlerError> {
        match self {
            Arg::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_source(&self) -> Option<&Emitter> {
        match self {
            Arg::Source(e) => Some(e),
            _ => None,
        }
    }
}

/// Emitters compare by identity, data and errors by value.
impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Data(a), Arg::Data(b)) => a == b,
            (Arg::Error(a), Arg::Error(b)) => a == b,
            (Arg::Source(a), Arg::Source(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Data(v)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Data(Value::String(s.to_owned()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Data(Value::String(s))
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Data(Value::from(n))
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Data(Value::from(n))
    }
}

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        Arg::Data(Value::from(n))
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Data(Value::Bool(b))
    }
}

impl From<HandlerError> for Arg {
    fn from(e: HandlerError) -> Self {
        Arg::Error(e)
    }
}

impl From<Emitter> for Arg {
    fn from(e: Emitter) -> Self {
        Arg::Source(e)
    }
}

impl From<&Emitter> for Arg {
    fn from(e: &Emitter) -> Self {
        Arg::Source(e.clone())
    }
}

/// Builds a `Vec<Arg>` from anything convertible into [`Arg`].
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
