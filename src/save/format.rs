use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// On-disk encoding of the save files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    /// Pick based on the host platform
    #[default]
    Auto,

    /// XOR, base64, and deflate. Used on Windows and Linux (Proton).
    Windows,

    /// AES-256-ECB. Used on macOS.
    Mac,
}

impl SaveFormat {
    /// Resolve [`SaveFormat::Auto`] to a concrete format for this platform
    pub fn resolve(self) -> SaveFormat {
        match self {
            SaveFormat::Auto if cfg!(target_os = "macos") => SaveFormat::Mac,
            SaveFormat::Auto => SaveFormat::Windows,
            x => x,
        }
    }

    /// Encode plaintext save data into this container format
    pub fn encode(self, plaintext: &[u8]) -> Result<Vec<u8>, super::SaveError> {
        match self.resolve() {
            SaveFormat::Mac => Ok(super::mac::encode(plaintext)),
            _ => super::windows::encode(plaintext),
        }
    }

    /// Decode a container of this format into plaintext
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>, super::SaveError> {
        match self.resolve() {
            SaveFormat::Mac => super::mac::decode(data),
            _ => super::windows::decode(data),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaveFormat::Auto => "auto",
            SaveFormat::Windows => "windows",
            SaveFormat::Mac => "mac",
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(SaveFormat::Auto),
            "windows" => Ok(SaveFormat::Windows),
            "mac" => Ok(SaveFormat::Mac),
            x => Err(ErrorKind::format(format!("unknown save format: {}", x)).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(SaveFormat::Windows, SaveFormat::Windows)]
    #[case(SaveFormat::Mac, SaveFormat::Mac)]
    fn test_resolve_concrete(#[case] format: SaveFormat, #[case] expected: SaveFormat) {
        assert_eq!(format.resolve(), expected);
    }

    #[test]
    fn test_resolve_auto() {
        let resolved = SaveFormat::Auto.resolve();
        if cfg!(target_os = "macos") {
            assert_eq!(resolved, SaveFormat::Mac);
        } else {
            assert_eq!(resolved, SaveFormat::Windows);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SaveFormat::Mac).unwrap(), "\"mac\"");
        let format: SaveFormat = serde_json::from_str("\"windows\"").unwrap();
        assert_eq!(format, SaveFormat::Windows);
        assert_eq!("auto".parse::<SaveFormat>().unwrap(), SaveFormat::Auto);
    }

    #[test]
    fn test_unknown_format_name() {
        let err = "linux".parse::<SaveFormat>().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FormatViolation { .. }));
    }
}
