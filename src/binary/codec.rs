//! Base64 and binary-string codecs.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::CodecError;

/// Standard alphabet, padding optional on decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes bytes as standard, padded base64.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes base64 into bytes.
///
/// The URL-safe alphabet (`-`, `_`) is normalized to the standard one, ASCII
/// whitespace is ignored and padding is optional.
///
/// # Example
/// ```
/// use rymd_utils::base64_to_bytes;
///
/// assert_eq!(base64_to_bytes("-_8").unwrap(), vec![0xfb, 0xff]);
/// assert_eq!(base64_to_bytes("+/8=").unwrap(), vec![0xfb, 0xff]);
/// ```
pub fn base64_to_bytes(encoded: &str) -> Result<Vec<u8>, CodecError> {
    let normalized: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    LENIENT
        .decode(normalized)
        .map_err(|e| CodecError::InvalidBase64 {
            error: e.to_string(),
        })
}

/// Renders bytes as a binary string (one `char` per byte, `U+0000..=U+00FF`),
/// truncated at the first NUL byte.
pub fn array_buffer_to_binary_string(buffer: &[u8]) -> String {
    buffer
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trips() {
        let long: Vec<u8> = (0..=255u8).cycle().take(300).collect();
        let cases: [&[u8]; 3] = [&[], &[0x7f], &long];
        for input in cases {
            let encoded = bytes_to_base64(input);
            assert_eq!(base64_to_bytes(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn url_safe_and_unpadded_input_decodes() {
        let bytes = vec![0xfb, 0xef, 0xbe, 0xff];
        let url_safe = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes);
        assert!(url_safe.contains('-') || url_safe.contains('_'));
        assert_eq!(base64_to_bytes(&url_safe).unwrap(), bytes);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(base64_to_bytes("VGVz\ndA==").unwrap(), b"Test");
    }

    #[test]
    fn garbage_is_rejected() {
        let err = base64_to_bytes("not base64!").unwrap_err();
        assert_eq!(err.as_label(), "codec_invalid_base64");
    }

    #[test]
    fn binary_string_stops_at_nul() {
        assert_eq!(array_buffer_to_binary_string(b"Test"), "Test");
        assert_eq!(array_buffer_to_binary_string(b"Te\0st"), "Te");
        assert_eq!(array_buffer_to_binary_string(&[0xe9, 0x41]), "\u{e9}A");
        assert_eq!(array_buffer_to_binary_string(&[]), "");
    }
}
