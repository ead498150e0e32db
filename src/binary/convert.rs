//! Blob ↔ byte-buffer conversions.

use crate::binary::Blob;

/// Copies the blob's bytes into a fresh buffer.
pub fn blob_to_array_buffer(blob: &Blob) -> Vec<u8> {
    blob.bytes().to_vec()
}

/// Wraps bytes into a blob, typed when `mime` is given.
pub fn array_buffer_to_blob(buffer: &[u8], mime: Option<&str>) -> Blob {
    match mime {
        Some(mime) => Blob::with_type(buffer, mime),
        None => Blob::new(buffer),
    }
}
