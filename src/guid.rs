//! Pseudo-random GUIDs.
//!
//! Uniqueness is probabilistic only: the source is `rand`'s thread-local
//! generator, not a cryptographic UUID.

use std::fmt::Write;

use rand::Rng;

/// 16-bit hex quads per dash-separated group (8-4-4-4-12 digits).
const GROUPS: [usize; 5] = [2, 1, 1, 1, 3];

/// Generates a GUID of the form `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// # Example
/// ```
/// let id = rymd_utils::guid();
/// assert_eq!(id.len(), 36);
/// assert_eq!(id.matches('-').count(), 4);
/// ```
pub fn guid() -> String {
    let mut rng = rand::rng();
    let mut out = String::with_capacity(36);
    for (i, quads) in GROUPS.iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        for _ in 0..*quads {
            // Writing into a String cannot fail.
            let _ = write!(out, "{:04x}", rng.random::<u16>());
        }
    }
    out
}
