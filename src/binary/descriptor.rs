//! # Blob descriptor.
//!
//! [`BlobDescriptor`] is a serializable snapshot of a blob:
//!
//! ```text
//! {
//!   "data": [..bytes..],
//!   "type": "image/jpeg",
//!   "name": "photo.jpg",      // "" when the blob has no name
//!   "date": "2024-05-01T09:30:00.000Z"   // modification time, or now
//! }
//! ```

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::binary::{Blob, blob_to_array_buffer};

/// Serializable description of a [`Blob`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobDescriptor {
    pub data: Vec<u8>,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub name: String,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub date: String,
}

/// Formats `at` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub(crate) fn iso_timestamp(at: OffsetDateTime) -> String {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    let utc = at.to_offset(UtcOffset::UTC);
    utc.format(&format)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}

/// Describes `blob`; see [`BlobDescriptor`].
pub fn blob_to_descriptor(blob: &Blob) -> BlobDescriptor {
    let date = blob.last_modified().unwrap_or_else(OffsetDateTime::now_utc);
    BlobDescriptor {
        data: blob_to_array_buffer(blob),
        mime_type: blob.mime_type().to_owned(),
        name: blob.name().unwrap_or_default().to_owned(),
        date: iso_timestamp(date),
    }
}
