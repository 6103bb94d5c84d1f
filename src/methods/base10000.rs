use super::{CodecOptions, DecodedFile, LevelCodec};
use crate::{
    compression,
    level::{Level, LevelObject, BLOCK_ID, GROUPS},
    Error, ErrorKind,
};

/// Bytes converted per big number
pub const BIG_CHUNK_SIZE: usize = 256;

const RADIX: u32 = 10_000;

/// Method 3: 256 byte chunks written as base 10000 numbers, prefixed with the
/// chunk length.
///
/// Smaller than raw groups, but the big number division makes encoding slow
/// and leaves group 0 (which the game does not have) in play.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base10000 {
    options: CodecOptions,
}

impl Base10000 {
    pub fn new(options: CodecOptions) -> Self {
        Base10000 { options }
    }
}

impl LevelCodec for Base10000 {
    fn encode(&self, _name: &str, content: &[u8]) -> Result<String, Error> {
        let payload = self.options.compress(content)?;
        let mut level = Level::new();
        for (i, chunk) in payload.chunks(BIG_CHUNK_SIZE).enumerate() {
            let mut groups = vec![chunk.len() as u16];
            groups.extend(to_radix(chunk));
            let groups = groups
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(".");

            let offset = (i * BIG_CHUNK_SIZE) as i64;
            let mut obj = LevelObject::block(BLOCK_ID, offset * 30, 0);
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

            let digits = groups
                .split('.')
                .map(|x| x.parse::<u16>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| {
                    ErrorKind::format(format!("object {} has a non-numeric group", i))
                })?;

            let Some((&len, digits)) = digits.split_first() else {
                continue;
            };
            payload.extend(from_radix(digits, usize::from(len))?);
        }

        Ok(DecodedFile {
            filename: None,
            data: self.options.decompress(payload)?,
        })
    }
}

/// Big endian bytes to base 10000 digits, most significant first. Zero is a
/// single `0` digit.
fn to_radix(data: &[u8]) -> Vec<u16> {
    let start = data.iter().position(|&b| b != 0).unwrap_or(data.len());
    let mut num = data[start..].to_vec();
    let mut digits = Vec::new();
    while !num.is_empty() {
        let mut rem: u32 = 0;
        let mut quotient = Vec::with_capacity(num.len());
        for &b in &num {
            let acc = (rem << 8) | u32::from(b);
            let q = acc / RADIX;
            rem = acc % RADIX;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }

        digits.push(rem as u16);
        num = quotient;
    }

    if digits.is_empty() {
        digits.push(0);
    }

    digits.reverse();
    digits
}

/// Base 10000 digits to exactly `len` big endian bytes
fn from_radix(digits: &[u16], len: usize) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; len];
    for &digit in digits {
        let mut carry = u32::from(digit);
        if carry >= RADIX {
            return Err(ErrorKind::format(format!("digit {} is out of range", digit)).into());
        }

        for b in out.iter_mut().rev() {
            let acc = u32::from(*b) * RADIX + carry;
            *b = acc as u8;
            carry = acc >> 8;
        }

        if carry != 0 {
            return Err(ErrorKind::format("number does not fit its declared length").into());
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case(&[], &[0])]
    #[case(&[0, 0], &[0])]
    #[case(&[0x27, 0x0f], &[9999])]
    #[case(&[0x27, 0x10], &[1, 0])]
    #[case(&[0x01, 0x00, 0x00], &[6, 5536])]
    fn test_to_radix(#[case] data: &[u8], #[case] expected: &[u16]) {
        assert_eq!(to_radix(data), expected);
        assert_eq!(from_radix(expected, data.len()).unwrap(), data);
    }

    #[test]
    fn test_from_radix_overflow() {
        assert!(from_radix(&[1, 0], 1).is_err());
        assert!(from_radix(&[10000], 4).is_err());
    }

    #[quickcheck]
    fn radix_roundtrip(data: Vec<u8>) -> bool {
        let data = &data[..data.len().min(BIG_CHUNK_SIZE)];
        from_radix(&to_radix(data), data.len()).unwrap() == data
    }
}
