use super::{CodecOptions, DecodedFile, LevelCodec};
use crate::{
    compression,
    level::{Level, LevelObject, BLOCK_ID, GROUPS},
    Error,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Base64 characters stored per object
pub const TEXT_CHUNK_SIZE: usize = 9999;

/// Method 4: base64 text stored where group ids belong.
///
/// The level text round trips here, but the game drops non-numeric groups
/// when it saves a level, so data stored this way does not survive a trip
/// through the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Groups {
    options: CodecOptions,
}

impl Base64Groups {
    pub fn new(options: CodecOptions) -> Self {
        Base64Groups { options }
    }
}

impl LevelCodec for Base64Groups {
    fn encode(&self, _name: &str, content: &[u8]) -> Result<String, Error> {
        let payload = self.options.compress(content)?;
        let text = STANDARD.encode(payload);
        let mut level = Level::new();

        // base64 output is ascii, so byte chunks are valid str boundaries
        for (i, chunk) in text.as_bytes().chunks(TEXT_CHUNK_SIZE).enumerate() {
            let mut obj = LevelObject::block(BLOCK_ID, i as i64 * 10, 0);
            obj.set_property(GROUPS, String::from_utf8_lossy(chunk));
            level.push(obj);
        }

        level.serialize()
    }

    fn decode(&self, level: &str) -> Result<DecodedFile, Error> {
        let level = Level::parse(&compression::level_text(level)?)?;
        let text: String = level
            .objects()
            .iter()
            .filter_map(|x| x.property(GROUPS))
            .collect();

        let payload = STANDARD.decode(text)?;
        Ok(DecodedFile {
            filename: None,
            data: self.options.decompress(payload)?,
        })
    }
}
