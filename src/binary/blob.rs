//! # In-memory blob.
//!
//! [`Blob`] is an immutable byte container with a MIME type. A blob may also
//! carry a file name and a modification time (the `File` flavour).
//!
//! ## Type normalization
//! The MIME type is stored lowercased. A type containing characters outside
//! printable ASCII (`0x20..=0x7E`) is replaced by the empty string.

use time::OffsetDateTime;

/// Immutable bytes plus metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
    mime: String,
    name: Option<String>,
    last_modified: Option<OffsetDateTime>,
}

fn normalize_type(mime: &str) -> String {
    if mime.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        mime.to_ascii_lowercase()
    } else {
        String::new()
    }
}

impl Blob {
    /// Creates an untyped blob.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Creates a blob with a MIME type.
    ///
    /// # Example
    /// ```
    /// use rymd_utils::Blob;
    ///
    /// let blob = Blob::with_type("Test", "Text/Plain");
    /// assert_eq!(blob.size(), 4);
    /// assert_eq!(blob.mime_type(), "text/plain");
    /// ```
    pub fn with_type(data: impl Into<Vec<u8>>, mime: &str) -> Self {
        Self {
            data: data.into(),
            mime: normalize_type(mime),
            ..Self::default()
        }
    }

    /// Attaches a file name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a modification time.
    #[must_use]
    pub fn modified_at(mut self, at: OffsetDateTime) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// MIME type; empty when untyped.
    #[inline]
    pub fn mime_type(&self) -> &str {
        &self.mime
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn last_modified(&self) -> Option<OffsetDateTime> {
        self.last_modified
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_is_lowercased() {
        assert_eq!(Blob::with_type("", "IMAGE/JPEG").mime_type(), "image/jpeg");
    }

    #[test]
    fn non_printable_type_is_dropped() {
        assert_eq!(Blob::with_type("", "text/\u{1}plain").mime_type(), "");
        assert_eq!(Blob::with_type("", "text/pläin").mime_type(), "");
    }

    #[test]
    fn file_metadata_is_optional() {
        let blob = Blob::new(vec![1, 2, 3]);
        assert_eq!(blob.name(), None);
        assert_eq!(blob.last_modified(), None);

        let at = OffsetDateTime::UNIX_EPOCH;
        let file = blob.clone().named("a.bin").modified_at(at);
        assert_eq!(file.name(), Some("a.bin"));
        assert_eq!(file.last_modified(), Some(at));
        assert_eq!(file.bytes(), blob.bytes());
    }
}
