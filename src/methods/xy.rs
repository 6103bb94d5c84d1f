use super::{CodecOptions, DecodedFile, LevelCodec};
use crate::{
    compression,
    level::{Level, LevelObject, BLOCK_ID, X, Y},
    Error, ErrorKind,
};

/// Marks an object that only carries a single byte in its x position
const NO_SECOND_BYTE: i64 = -1;

/// Method 1: two bytes per object, stored as x and y
#[derive(Debug, Clone, Copy, Default)]
pub struct XyCoordinates {
    options: CodecOptions,
}

impl XyCoordinates {
    pub fn new(options: CodecOptions) -> Self {
        XyCoordinates { options }
    }
}

impl LevelCodec for XyCoordinates {
    fn encode(&self, _name: &str, content: &[u8]) -> Result<String, Error> {
        let payload = self.options.compress(content)?;
        let mut level = Level::new();
        let mut pairs = payload.chunks_exact(2);
        for pair in pairs.by_ref() {
            level.push(LevelObject::block(
                BLOCK_ID,
                i64::from(pair[0]),
                i64::from(pair[1]),
            ));
        }

        if let [last] = pairs.remainder() {
            level.push(LevelObject::block(BLOCK_ID, i64::from(*last), NO_SECOND_BYTE));
        }

        level.serialize()
    }

    fn decode(&self, level: &str) -> Result<DecodedFile, Error> {
        let level = Level::parse(&compression::level_text(level)?)?;
        let mut payload = Vec::with_capacity(level.len() * 2);
        for object in level.objects() {
            let x = object.property_i64(X)?.unwrap_or(0);
            let y = object.property_i64(Y)?.unwrap_or(0);
            payload.push(to_byte(x)?);
            if y != NO_SECOND_BYTE {
                payload.push(to_byte(y)?);
            }
        }

        Ok(DecodedFile {
            filename: None,
            data: self.options.decompress(payload)?,
        })
    }
}

fn to_byte(value: i64) -> Result<u8, Error> {
    u8::try_from(value).map_err(|_| {
        ErrorKind::format(format!("position {} is not a byte value", value)).into()
    })
}
