//! The base 9999 packing codec.
//!
//! Files are stored in the group ids of invisible blocks. Group ids are
//! integers between 1 and 9999, so the payload is treated as a number written
//! in base 9999:
//!
//! 1. The file name is prepended (`len:u8 | name | content`) and the frame is
//!    compressed.
//! 2. Every 8 byte chunk (the last one zero padded) is read as a big endian
//!    `u64` and written as exactly five digits, each shifted up by one as
//!    group 0 does not exist.
//! 3. Two header digits carry the compressed length so that the padding can be
//!    dropped on the way back.
//! 4. The digits are distributed over objects with [`GroupPacker`], which
//!    keeps every group list loadable by the game.
//! 5. The level is gzipped and base64 encoded, the format the game uses for
//!    level strings.
//!
//! ```
//! use gdstore::packing::PackingCodec;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = PackingCodec::new();
//! let level = codec.encode("notes.txt", b"hello world")?;
//! assert!(level.starts_with("H4sI"));
//!
//! let (name, data) = codec.decode(&level)?;
//! assert_eq!(name, "notes.txt");
//! assert_eq!(data, b"hello world");
//! # Ok(())
//! # }
//! ```

mod builder;
mod digits;

pub use builder::*;
pub use digits::*;

use crate::{
    compression,
    level::{join_groups, Level, LevelObject, BLOCK_ID, GROUPS},
    Error, ErrorKind,
};
use log::debug;

/// Longest file name that fits the one byte length prefix
pub const MAX_NAME_LEN: usize = 255;

/// Horizontal distance between consecutive data objects
pub const OBJECT_SPACING: i64 = 30;

/// Prefix content with its file name: `len:u8 | name | content`.
///
/// Names longer than [`MAX_NAME_LEN`] bytes are cut at that byte length.
pub fn frame(name: &str, content: &[u8]) -> Vec<u8> {
    let name = &name.as_bytes()[..name.len().min(MAX_NAME_LEN)];
    let mut out = Vec::with_capacity(1 + name.len() + content.len());
    out.push(name.len() as u8);
    out.extend_from_slice(name);
    out.extend_from_slice(content);
    out
}

/// Split a frame back into its name and content. Names that are not valid
/// utf-8 are decoded lossily.
pub fn unframe(data: &[u8]) -> Result<(String, Vec<u8>), Error> {
    let Some((&name_len, rest)) = data.split_first() else {
        return Err(ErrorKind::format("empty result after decompression").into());
    };

    let name_len = usize::from(name_len);
    if rest.len() < name_len {
        return Err(ErrorKind::format(format!(
            "filename length {} exceeds the {} bytes that follow it",
            name_len,
            rest.len()
        ))
        .into());
    }

    let (name, content) = rest.split_at(name_len);
    Ok((String::from_utf8_lossy(name).into_owned(), content.to_vec()))
}

/// Collect the group digits of every object in document order. Objects
/// without a group list are skipped.
pub fn level_digits(level: &Level) -> Result<Vec<u16>, Error> {
    let mut out = Vec::new();
    for (i, object) in level.objects().iter().enumerate() {
        let Some(groups) = object.property(GROUPS) else {
            continue;
        };

        for group in groups.split('.') {
            let digit = group.parse::<u16>().map_err(|_| {
                ErrorKind::format(format!("object {} has a non-numeric group: {}", i, group))
            })?;

            if !(MIN_DIGIT..=MAX_DIGIT).contains(&digit) {
                return Err(ErrorKind::format(format!(
                    "object {} has an out of range group: {}",
                    i, digit
                ))
                .into());
            }

            out.push(digit);
        }
    }

    Ok(out)
}

/// Lay out digits as data blocks
pub fn digits_level(digits: &[u16]) -> Level {
    let mut level = Level::new();
    for (i, groups) in pack_groups(digits).iter().enumerate() {
        let mut obj = LevelObject::block(BLOCK_ID, i as i64 * OBJECT_SPACING, 0);
        obj.set_property(GROUPS, join_groups(groups));
        level.push(obj);
    }
    level
}

/// Encodes files as base 9999 group ids
#[derive(Debug, Clone, Copy, Default)]
pub struct PackingCodec {
    skip_compression: bool,
}

impl PackingCodec {
    /// Creates a codec that compresses payloads
    pub fn new() -> Self {
        Self::default()
    }

    /// Store frames without zstd compression. Only useful for testing.
    pub fn skip_compression(mut self, skip: bool) -> Self {
        self.skip_compression = skip;
        self
    }

    /// The payload that gets turned into digits
    pub fn payload(&self, name: &str, content: &[u8]) -> Result<Vec<u8>, Error> {
        let framed = frame(name, content);
        if self.skip_compression {
            Ok(framed)
        } else {
            compression::compress(&framed)
        }
    }

    /// Encode a file into a level without the outer gzip envelope
    pub fn encode_level(&self, name: &str, content: &[u8]) -> Result<Level, Error> {
        let payload = self.payload(name, content)?;
        let digits = bytes_to_digits(&payload)?;
        let level = digits_level(&digits);
        debug!(
            "packed {} bytes ({} compressed) into {} groups across {} objects",
            content.len(),
            payload.len(),
            digits.len(),
            level.len()
        );
        Ok(level)
    }

    /// Encode a file into a gzipped, base64 level string
    pub fn encode(&self, name: &str, content: &[u8]) -> Result<String, Error> {
        let level = self.encode_level(name, content)?;
        compression::compress_level_string(&level.serialize()?)
    }

    /// Decode a level string, compressed or raw, into the file name and
    /// content
    pub fn decode(&self, data: &str) -> Result<(String, Vec<u8>), Error> {
        let text = compression::level_text(data)?;
        let level = Level::parse(&text)?;
        self.decode_level(&level)
    }

    /// Decode an already parsed level
    pub fn decode_level(&self, level: &Level) -> Result<(String, Vec<u8>), Error> {
        let digits = level_digits(level)?;
        let payload = digits_to_bytes(&digits)?;
        debug!(
            "recovered {} byte payload from {} groups",
            payload.len(),
            digits.len()
        );

        let framed = if self.skip_compression {
            payload
        } else {
            compression::decompress(&payload)?
        };

        unframe(&framed)
    }
}
