//! # Object URL registry.
//!
//! [`ObjectUrlRegistry`] hands out `blob:<origin>/<guid>` URLs for in-memory
//! data and resolves them back to blobs until revoked.
//!
//! ## Example
//! ```rust
//! use rymd_utils::{Blob, ObjectUrlRegistry};
//!
//! let registry = ObjectUrlRegistry::new("https://app.example");
//! let url = registry.to_object_url(Blob::with_type("Test", "text/plain"), None);
//! assert!(url.starts_with("blob:https://app.example/"));
//! assert_eq!(registry.resolve(&url).unwrap().bytes(), b"Test");
//!
//! assert!(registry.revoke(&url));
//! assert!(registry.resolve(&url).is_none());
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::binary::{Blob, array_buffer_to_blob};
use crate::guid::guid;

/// Data accepted by [`ObjectUrlRegistry::to_object_url`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectData {
    /// Registered as-is; the `mime` argument is ignored.
    Blob(Blob),
    /// Wrapped into a blob typed with `mime`.
    Bytes(Vec<u8>),
    /// UTF-8 encoded and wrapped into a blob typed with `mime`.
    Text(String),
}

impl From<Blob> for ObjectData {
    fn from(b: Blob) -> Self {
        ObjectData::Blob(b)
    }
}

impl From<Vec<u8>> for ObjectData {
    fn from(b: Vec<u8>) -> Self {
        ObjectData::Bytes(b)
    }
}

impl From<&[u8]> for ObjectData {
    fn from(b: &[u8]) -> Self {
        ObjectData::Bytes(b.to_vec())
    }
}

impl From<String> for ObjectData {
    fn from(s: String) -> Self {
        ObjectData::Text(s)
    }
}

impl From<&str> for ObjectData {
    fn from(s: &str) -> Self {
        ObjectData::Text(s.to_owned())
    }
}

/// In-memory URL → blob table.
#[derive(Debug)]
pub struct ObjectUrlRegistry {
    origin: String,
    entries: Mutex<HashMap<String, Blob>>,
}

impl Default for ObjectUrlRegistry {
    /// Registry for an opaque origin (`blob:null/...`).
    fn default() -> Self {
        Self::new("null")
    }
}

impl ObjectUrlRegistry {
    /// Creates an empty registry for `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `data` and returns its URL.
    pub fn to_object_url(&self, data: impl Into<ObjectData>, mime: Option<&str>) -> String {
        let blob = match data.into() {
            ObjectData::Blob(blob) => blob,
            ObjectData::Bytes(bytes) => array_buffer_to_blob(&bytes, mime),
            ObjectData::Text(text) => Blob::with_type(text, mime.unwrap_or_default()),
        };
        let url = format!("blob:{}/{}", self.origin, guid());
        trace!(url = %url, size = blob.size(), "object url created");
        self.entries().insert(url.clone(), blob);
        url
    }

    /// Returns the blob behind `url`, if still registered.
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        self.entries().get(url).cloned()
    }

    /// Releases `url`. Returns `false` if it was unknown.
    pub fn revoke(&self, url: &str) -> bool {
        self.entries().remove(url).is_some()
    }

    /// Number of live URLs.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn url_pattern() -> Regex {
        Regex::new(r"^blob:.+/[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
    }

    #[test]
    fn blob_text_and_bytes_all_produce_urls() {
        let registry = ObjectUrlRegistry::default();
        let from_blob = registry.to_object_url(Blob::new("Test"), None);
        let from_text = registry.to_object_url("Test", Some("text/plain"));
        let from_bytes = registry.to_object_url(vec![1u8, 2, 3], Some("application/x-raw"));

        for url in [&from_blob, &from_text, &from_bytes] {
            assert!(url_pattern().is_match(url), "{url}");
            assert!(url.starts_with("blob:null/"));
        }
        assert_eq!(registry.len(), 3);

        assert_eq!(registry.resolve(&from_text).unwrap().mime_type(), "text/plain");
        assert_eq!(
            registry.resolve(&from_bytes).unwrap().mime_type(),
            "application/x-raw"
        );
    }

    #[test]
    fn blob_keeps_its_own_type() {
        let registry = ObjectUrlRegistry::new("https://x");
        let url = registry.to_object_url(Blob::with_type("a", "text/css"), Some("image/png"));
        assert_eq!(registry.resolve(&url).unwrap().mime_type(), "text/css");
    }

    #[test]
    fn revoke_is_one_shot() {
        let registry = ObjectUrlRegistry::new("https://x");
        let url = registry.to_object_url(&b"abc"[..], None);
        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
        assert!(registry.is_empty());
    }
}
