//! Binary data: blobs and the conversions between blobs, byte buffers,
//! binary strings, base64, data URLs and object URLs.
//!
//! ## Contents
//! - [`Blob`] immutable bytes with a MIME type (and optional file metadata)
//! - [`blob_to_array_buffer`], [`array_buffer_to_blob`], [`array_buffer_to_binary_string`]
//! - [`bytes_to_base64`], [`base64_to_bytes`] (URL-safe input accepted)
//! - [`data_url_to_blob`], [`blob_to_data_url`]
//! - [`ObjectUrlRegistry`] revocable `blob:` URLs
//! - [`blob_to_descriptor`] serializable `{data, type, name, date}`
//!
//! ## Conversion map
//! ```text
//!              blob_to_array_buffer            array_buffer_to_binary_string
//!   Blob  ───────────────────────────►  Vec<u8>  ─────────────────────────────►  String
//!    ▲  ◄───────────────────────────      │  ▲
//!    │         array_buffer_to_blob       │  │ base64_to_bytes
//!    │                                    ▼  │
//!    │ data_url_to_blob                 base64 String
//!    │
//!  data URL            ObjectUrlRegistry: Blob | bytes | text ──► "blob:<origin>/<guid>"
//! ```

mod blob;
mod codec;
mod convert;
mod data_url;
mod descriptor;
mod object_url;

pub use blob::Blob;
pub use codec::{array_buffer_to_binary_string, base64_to_bytes, bytes_to_base64};
pub use convert::{array_buffer_to_blob, blob_to_array_buffer};
pub use data_url::{blob_to_data_url, data_url_to_blob};
pub use descriptor::{BlobDescriptor, blob_to_descriptor};
pub use object_url::{ObjectData, ObjectUrlRegistry};
