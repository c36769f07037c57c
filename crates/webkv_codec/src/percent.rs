//! Percent encoding with `encodeURIComponent` semantics.
//!
//! The unreserved set is `A-Z a-z 0-9 - _ . ! ~ * ' ( )`. Every other
//! character is written as the `%XX` escapes of its UTF-8 bytes, using
//! uppercase hex digits.

use crate::error::{CodecError, CodecResult};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(byte: u8) -> bool {
    matches!(
        byte,
        b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')'
    )
}

/// Percent-encodes a string component.
///
/// The output never contains `;`, `=`, `,` or whitespace, so it is safe to
/// embed in a cookie assignment.
///
/// ```
/// use webkv_codec::encode_component;
///
/// assert_eq!(encode_component("a b;c=d"), "a%20b%3Bc%3Dd");
/// assert_eq!(encode_component("\u{2615}"), "%E2%98%95");
/// ```
pub fn encode_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if is_unreserved(byte) {
            result.push(byte as char);
        } else {
            result.push('%');
            result.push(HEX[usize::from(byte >> 4)] as char);
            result.push(HEX[usize::from(byte & 0x0f)] as char);
        }
    }
    result
}

/// Decodes every `%XX` escape in a string component.
///
/// # Errors
///
/// Returns [`CodecError::MalformedEscape`] for a truncated or non-hex escape,
/// and [`CodecError::InvalidUtf8`] if the decoded bytes are not UTF-8.
pub fn decode_component(input: &str) -> CodecResult<String> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if byte != b'%' {
            decoded.push(byte);
            pos += 1;
            continue;
        }

        let high = bytes.get(pos + 1).copied().and_then(hex_value);
        let low = bytes.get(pos + 2).copied().and_then(hex_value);
        match (high, low) {
            (Some(high), Some(low)) => {
                decoded.push((high << 4) | low);
                pos += 3;
            }
            _ => return Err(CodecError::MalformedEscape { position: pos }),
        }
    }

    String::from_utf8(decoded).map_err(|_| CodecError::InvalidUtf8)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
