//! Every way a file can be stored in a level.
//!
//! Methods 1 to 5 are earlier experiments that are kept decodable. Each has a
//! known flaw in practice, which is why [`Method::Base9999`] is the default:
//!
//! | Method | Storage | Limitation |
//! |---|---|---|
//! | 1 | two bytes per object in the x and y positions | one object per two bytes |
//! | 2 | raw byte values as group ids | levels grow to gigabytes |
//! | 3 | 256 byte chunks as base 10000 numbers | quadratic big number division |
//! | 4 | base64 text as group ids | the game strips non-numeric groups |
//! | 5 | base64 text in one text object | exceeds the property length limit |
//! | 6 | base 9999 digits, 8 bytes per five groups | |
//!
//! ```
//! use gdstore::methods::{CodecOptions, Method};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = Method::RawGroups.codec(CodecOptions::default());
//! let level = codec.encode("bytes.bin", &[0, 1, 2, 255])?;
//! let decoded = codec.decode(&level)?;
//! assert_eq!(decoded.data, vec![0, 1, 2, 255]);
//! assert_eq!(decoded.filename, None);
//! # Ok(())
//! # }
//! ```

mod base10000;
mod base64_groups;
mod raw_groups;
mod text_property;
mod xy;

pub use base10000::Base10000;
pub use base64_groups::Base64Groups;
pub use raw_groups::RawGroups;
pub use text_property::TextProperty;
pub use xy::XyCoordinates;

use crate::{compression, packing::PackingCodec, Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// A file recovered from a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    /// File name, only stored by [`Method::Base9999`]
    pub filename: Option<String>,

    /// File content
    pub data: Vec<u8>,
}

/// Shared encode and decode capability of all methods
pub trait LevelCodec {
    /// Encode a file into level text
    fn encode(&self, name: &str, content: &[u8]) -> Result<String, Error>;

    /// Decode level text back into a file
    fn decode(&self, level: &str) -> Result<DecodedFile, Error>;
}

/// Options shared by every method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Store payloads without zstd compression
    pub skip_compression: bool,
}

impl CodecOptions {
    pub(crate) fn compress(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        if self.skip_compression {
            Ok(data.to_vec())
        } else {
            compression::compress(data)
        }
    }

    pub(crate) fn decompress(&self, data: Vec<u8>) -> Result<Vec<u8>, Error> {
        if self.skip_compression {
            Ok(data)
        } else {
            compression::decompress(&data)
        }
    }
}

/// The storage method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Method 1
    XyCoordinates,

    /// Method 2
    RawGroups,

    /// Method 3
    Base10000,

    /// Method 4
    Base64Groups,

    /// Method 5
    TextProperty,

    /// Method 6
    #[default]
    Base9999,
}

impl Method {
    /// All methods in numeric order
    pub const ALL: [Method; 6] = [
        Method::XyCoordinates,
        Method::RawGroups,
        Method::Base10000,
        Method::Base64Groups,
        Method::TextProperty,
        Method::Base9999,
    ];

    /// Creates a method from its number
    pub fn new(number: u8) -> Option<Method> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// The method number
    pub fn value(&self) -> u8 {
        match self {
            Method::XyCoordinates => 1,
            Method::RawGroups => 2,
            Method::Base10000 => 3,
            Method::Base64Groups => 4,
            Method::TextProperty => 5,
            Method::Base9999 => 6,
        }
    }

    /// Short description including why it is (not) used
    pub fn description(&self) -> &'static str {
        match self {
            Method::XyCoordinates => "X/Y Coordinates - Unoptimized",
            Method::RawGroups => "Raw Groups - 1GB levels",
            Method::Base10000 => "Base 10000 - Slow",
            Method::Base64Groups => "Base64 Groups - Stripped by GD",
            Method::TextProperty => "Property 31 - Doesn't work",
            Method::Base9999 => "Optimized Base 9999 - Best",
        }
    }

    /// Instantiate the codec for this method
    pub fn codec(&self, options: CodecOptions) -> Box<dyn LevelCodec> {
        match self {
            Method::XyCoordinates => Box::new(XyCoordinates::new(options)),
            Method::RawGroups => Box::new(RawGroups::new(options)),
            Method::Base10000 => Box::new(Base10000::new(options)),
            Method::Base64Groups => Box::new(Base64Groups::new(options)),
            Method::TextProperty => Box::new(TextProperty::new(options)),
            Method::Base9999 => {
                Box::new(PackingCodec::new().skip_compression(options.skip_compression))
            }
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.value(), self.description())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = s.trim().parse::<u8>().ok().and_then(Method::new);
        method.ok_or_else(|| Error::from(ErrorKind::format(format!("unknown method: {}", s))))
    }
}

impl LevelCodec for PackingCodec {
    fn encode(&self, name: &str, content: &[u8]) -> Result<String, Error> {
        PackingCodec::encode(self, name, content)
    }

    fn decode(&self, level: &str) -> Result<DecodedFile, Error> {
        let (filename, data) = PackingCodec::decode(self, level)?;
        Ok(DecodedFile {
            filename: Some(filename),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(0, None)]
    #[case(1, Some(Method::XyCoordinates))]
    #[case(6, Some(Method::Base9999))]
    #[case(7, None)]
    fn test_method_number(#[case] number: u8, #[case] expected: Option<Method>) {
        assert_eq!(Method::new(number), expected);
        if let Some(method) = expected {
            assert_eq!(method.value(), number);
        }
    }

    #[test]
    fn test_default_method() {
        assert_eq!(Method::default(), Method::Base9999);
        assert_eq!("6".parse::<Method>().unwrap(), Method::Base9999);
        let err = "9".parse::<Method>().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FormatViolation { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(Method::Base10000.to_string(), "3 - Base 10000 - Slow");
    }

    #[rstest]
    fn test_all_methods_roundtrip(
        #[values(
            Method::XyCoordinates,
            Method::RawGroups,
            Method::Base10000,
            Method::Base64Groups,
            Method::TextProperty,
            Method::Base9999
        )]
        method: Method,
        #[values(false, true)] skip_compression: bool,
    ) {
        let content: Vec<u8> = (0..=255u8).chain(0..=42u8).collect();
        let codec = method.codec(CodecOptions { skip_compression });
        let level = codec.encode("all.bin", &content).unwrap();
        let decoded = codec.decode(&level).unwrap();
        assert_eq!(decoded.data, content);
        if method == Method::Base9999 {
            assert_eq!(decoded.filename.as_deref(), Some("all.bin"));
        } else {
            assert_eq!(decoded.filename, None);
        }
    }
}
