//! `data:` URL parsing and rendering.
//!
//! Two forms are understood:
//! - `data:<type>;base64,<payload>`: payload decoded as base64
//! - `data:<type>,<raw>`: raw text taken verbatim as UTF-8 bytes (no percent-decoding)

use crate::binary::{Blob, base64_to_bytes, bytes_to_base64};
use crate::error::CodecError;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Builds a blob from a data URL.
///
/// # Example
/// ```
/// use rymd_utils::data_url_to_blob;
///
/// let blob = data_url_to_blob("data:text/plain;base64,VGVzdA==").unwrap();
/// assert_eq!(blob.bytes(), b"Test");
/// assert_eq!(blob.mime_type(), "text/plain");
///
/// let plain = data_url_to_blob("data:text/csv,a,b").unwrap();
/// assert_eq!(plain.bytes(), b"a,b");
/// ```
pub fn data_url_to_blob(data_url: &str) -> Result<Blob, CodecError> {
    let rest = data_url
        .get(..SCHEME.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
        .map(|_| &data_url[SCHEME.len()..])
        .ok_or(CodecError::InvalidDataUrl {
            reason: "missing data: scheme",
        })?;

    if let Some((mime, payload)) = rest.split_once(BASE64_MARKER) {
        let bytes = base64_to_bytes(payload)?;
        return Ok(Blob::with_type(bytes, mime));
    }

    let (mime, raw) = rest.split_once(',').ok_or(CodecError::InvalidDataUrl {
        reason: "missing ',' separator",
    })?;
    Ok(Blob::with_type(raw, mime))
}

/// Renders a blob as a base64 data URL.
///
/// Untyped blobs are labelled `application/octet-stream`.
pub fn blob_to_data_url(blob: &Blob) -> String {
    let mime = match blob.mime_type() {
        "" => "application/octet-stream",
        mime => mime,
    };
    format!("{SCHEME}{mime}{BASE64_MARKER}{}", bytes_to_base64(blob.bytes()))
}
