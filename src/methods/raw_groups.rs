use super::{CodecOptions, DecodedFile, LevelCodec};
use crate::{
    compression,
    level::{Level, LevelObject, BLOCK_ID, GROUPS},
    Error, ErrorKind,
};

/// Byte values stored per object
pub const RAW_CHUNK_SIZE: usize = 9999;

/// Method 2: raw byte values (0 to 255) as group ids.
///
/// Round trips, but a level for a modest file grows to around a gigabyte and
/// the game crashes on exit after loading it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawGroups {
    options: CodecOptions,
}

impl RawGroups {
    pub fn new(options: CodecOptions) -> Self {
        RawGroups { options }
    }
}

impl LevelCodec for RawGroups {
    fn encode(&self, _name: &str, content: &[u8]) -> Result<String, Error> {
        let payload = self.options.compress(content)?;
        let mut level = Level::new();
        for (i, chunk) in payload.chunks(RAW_CHUNK_SIZE).enumerate() {
            let groups = chunk
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(".");
            let mut obj = LevelObject::block(BLOCK_ID, i as i64 * 10, 0);
            obj.set_property(GROUPS, groups);
            level.push(obj);
        }

        level.serialize()
    }

    fn decode(&self, level: &str) -> Result<DecodedFile, Error> {
        let level = Level::parse(&compression::level_text(level)?)?;
        let mut payload = Vec::new();
        for (i, object) in level.objects().iter().enumerate() {
            let groups = object.property(GROUPS).ok_or_else(|| {
                ErrorKind::format(format!("object {} is missing its groups", i))
            })?;

            for group in groups.split('.') {
                let byte = group.parse::<u8>().map_err(|_| {
                    ErrorKind::format(format!("object {} has a non-byte group: {}", i, group))
                })?;
                payload.push(byte);
            }
        }

        Ok(DecodedFile {
            filename: None,
            data: self.options.decompress(payload)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking() {
        let codec = RawGroups::new(CodecOptions {
            skip_compression: true,
        });
        let content = vec![7u8; RAW_CHUNK_SIZE + 1];
        let level = codec.encode("", &content).unwrap();
        let parsed = Level::parse(&level).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.objects()[1].property(GROUPS), Some("7"));
        assert_eq!(codec.decode(&level).unwrap().data, content);
    }

    #[test]
    fn test_missing_groups() {
        let codec = RawGroups::new(CodecOptions::default());
        assert!(codec.decode("h;1,211,2,0,3,0;").is_err());
    }
}
