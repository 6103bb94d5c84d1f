//! Generic byte compression used ahead of every level codec.
//!
//! Level payloads are compressed with zstd at a high level before they are
//! spread across objects. The level string that carries them is separately
//! gzipped (see [`compress_level_string`]) because that is the form the game
//! and its servers expect.

use crate::{Error, ErrorKind};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine};
use flate2::read::{GzDecoder, GzEncoder};
use flate2::Compression;
use std::io::Read;

/// zstd level for file payloads
pub const ZSTD_LEVEL: i32 = 19;

/// Base64 text of the gzip magic bytes, marks a compressed level string
pub const GZIP_LEVEL_PREFIX: &str = "H4sI";

pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Compress bytes with zstd
pub fn compress(data: &[u8]) -> Result<Vec<u8>, Error> {
    zstd::bulk::compress(data, ZSTD_LEVEL).map_err(Error::from)
}

/// Decompress bytes previously produced by [`compress`]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, Error> {
    zstd::stream::decode_all(data)
        .map_err(|e| ErrorKind::corrupt(format!("zstd decompression failed: {}", e)).into())
}

/// Gzip a level string and encode it with the url safe base64 alphabet,
/// stripping padding
pub fn compress_level_string(level: &str) -> Result<String, Error> {
    let mut encoder = GzEncoder::new(level.as_bytes(), Compression::default());
    let mut gz = Vec::new();
    encoder.read_to_end(&mut gz)?;
    Ok(URL_SAFE_NO_PAD.encode(gz))
}

/// Returns true if the level string looks gzipped and base64 encoded
pub fn is_compressed_level_string(data: &str) -> bool {
    data.starts_with(GZIP_LEVEL_PREFIX)
}

/// Reverse [`compress_level_string`]. Padding is optional.
pub fn decompress_level_string(data: &str) -> Result<String, Error> {
    let gz = URL_SAFE_LENIENT.decode(data.trim_end())?;
    let mut decoder = GzDecoder::new(gz.as_slice());
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| ErrorKind::corrupt(format!("gzip decompression failed: {}", e)))?;
    Ok(String::from_utf8(out)?)
}

/// Return the raw level text, decompressing it first when it carries the
/// gzip prefix
pub fn level_text(data: &str) -> Result<String, Error> {
    if is_compressed_level_string(data) {
        decompress_level_string(data)
    } else {
        Ok(data.to_string())
    }
}
