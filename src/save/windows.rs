//! Format A: the container used on Windows and by Proton on Linux.
//!
//! ```text
//! xor 11 ( base64url ( 1f8b0800 00000000 000b | raw deflate | crc32 | size ) )
//! ```
//!
//! The gzip style header is fixed and the trailer is written little endian.
//! Decoding ignores both.

use super::{SaveError, SaveErrorKind};
use crate::compression::URL_SAFE_LENIENT;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use flate2::read::{DeflateDecoder, DeflateEncoder};
use flate2::{Compression, Crc};
use std::io::Read;

/// Byte every container character is XORed with
pub const XOR_KEY: u8 = 11;

/// Fixed header written ahead of the deflate stream
pub const HEADER: [u8; 10] = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0b];

const TRAILER_LEN: usize = 8;

fn xor(data: &mut [u8]) {
    for b in data.iter_mut() {
        *b ^= XOR_KEY;
    }
}

/// Decode a format A container into plaintext
pub fn decode(data: &[u8]) -> Result<Vec<u8>, SaveError> {
    let mut text = data.to_vec();
    xor(&mut text);

    // the game pads files with zero bytes which xor into the key itself
    while let Some(&last) = text.last() {
        if last == XOR_KEY || last.is_ascii_whitespace() {
            text.pop();
        } else {
            break;
        }
    }

    let raw = URL_SAFE_LENIENT.decode(&text)?;
    if raw.len() < HEADER.len() {
        return Err(SaveErrorKind::CorruptData(format!(
            "container of {} bytes is shorter than its header",
            raw.len()
        ))
        .into());
    }

    let body = &raw[HEADER.len()..];
    let body = if body.len() >= TRAILER_LEN {
        &body[..body.len() - TRAILER_LEN]
    } else {
        body
    };

    let mut out = Vec::new();
    DeflateDecoder::new(body)
        .read_to_end(&mut out)
        .map_err(|e| SaveErrorKind::CorruptData(format!("inflate: {}", e)))?;

    log::debug!("decoded format A container: {} -> {} bytes", data.len(), out.len());
    Ok(out)
}

/// Encode plaintext into a format A container
pub fn encode(plaintext: &[u8]) -> Result<Vec<u8>, SaveError> {
    let mut raw = HEADER.to_vec();
    DeflateEncoder::new(plaintext, Compression::default()).read_to_end(&mut raw)?;

    let mut crc = Crc::new();
    crc.update(plaintext);
    raw.extend_from_slice(&crc.sum().to_le_bytes());
    raw.extend_from_slice(&crc.amount().to_le_bytes());

    let mut out = URL_SAFE.encode(raw).into_bytes();
    xor(&mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_layout() {
        let encoded = encode(b"<?xml version=\"1.0\"?><plist/>").unwrap();
        let mut text = encoded.clone();
        xor(&mut text);
        let raw = URL_SAFE.decode(&text).unwrap();
        assert_eq!(&raw[..HEADER.len()], &HEADER);

        let trailer = &raw[raw.len() - TRAILER_LEN..];
        assert_eq!(&trailer[4..], &29u32.to_le_bytes());
        assert_eq!(decode(&encoded).unwrap(), b"<?xml version=\"1.0\"?><plist/>");
    }

    #[test]
    fn test_trailing_padding() {
        let mut encoded = encode(b"<k>k_0</k>").unwrap();
        encoded.extend_from_slice(&[0, 0, 0]);
        assert_eq!(decode(&encoded).unwrap(), b"<k>k_0</k>");
    }

    #[test]
    fn test_garbage() {
        let err = decode(b"!!!!").unwrap_err();
        assert!(matches!(err.kind(), SaveErrorKind::CorruptData(_)));
    }

    #[quickcheck]
    fn format_a_roundtrip(data: Vec<u8>) -> bool {
        decode(&encode(&data).unwrap()).unwrap() == data
    }
}
