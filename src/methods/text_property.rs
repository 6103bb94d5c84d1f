use super::{CodecOptions, DecodedFile, LevelCodec};
use crate::{
    compression,
    level::{Level, LevelObject, BLOCK_ID, TEXT},
    Error, ErrorKind,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Method 5: the whole payload as base64 in the text property of a single
/// object.
///
/// The game caps the length of that property, so anything but tiny files is
/// cut off. Kept for completeness.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextProperty {
    options: CodecOptions,
}

impl TextProperty {
    pub fn new(options: CodecOptions) -> Self {
        TextProperty { options }
    }
}

impl LevelCodec for TextProperty {
    fn encode(&self, _name: &str, content: &[u8]) -> Result<String, Error> {
        let payload = self.options.compress(content)?;
        let mut obj = LevelObject::block(BLOCK_ID, 0, 0);
        obj.set_property(TEXT, STANDARD.encode(payload));

        let mut level = Level::new();
        level.push(obj);
        level.serialize()
    }

    fn decode(&self, level: &str) -> Result<DecodedFile, Error> {
        let level = Level::parse(&compression::level_text(level)?)?;
        let text = level
            .objects()
            .first()
            .and_then(|x| x.property(TEXT))
            .ok_or_else(|| ErrorKind::format("first object has no text property"))?;

        let payload = STANDARD.decode(text)?;
        Ok(DecodedFile {
            filename: None,
            data: self.options.decompress(payload)?,
        })
    }
}
