use std::path::PathBuf;

/// Error type for save container operations
#[derive(Debug)]
pub struct SaveError {
    kind: SaveErrorKind,
}

impl SaveError {
    /// Return the specific type of error
    pub fn kind(&self) -> &SaveErrorKind {
        &self.kind
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> SaveErrorKind {
        self.kind
    }
}

impl From<SaveErrorKind> for SaveError {
    fn from(kind: SaveErrorKind) -> Self {
        SaveError { kind }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(error: std::io::Error) -> Self {
        SaveError {
            kind: SaveErrorKind::Io(error),
        }
    }
}

impl From<base64::DecodeError> for SaveError {
    fn from(error: base64::DecodeError) -> Self {
        SaveError {
            kind: SaveErrorKind::CorruptData(format!("base64: {}", error)),
        }
    }
}

/// Specific kind of save error
#[derive(Debug)]
pub enum SaveErrorKind {
    /// IO error during file operations
    Io(std::io::Error),
    /// Container failed to decode, decompress, or decrypt
    CorruptData(String),
    /// A level or entry is absent from the save
    NotFound(String),
    /// The configured save folder does not exist
    MissingDirectory(PathBuf),
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            SaveErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            SaveErrorKind::Io(err) => write!(f, "IO error: {}", err),
            SaveErrorKind::CorruptData(msg) => write!(f, "Corrupt save data: {}", msg),
            SaveErrorKind::NotFound(what) => write!(f, "{} not found in save", what),
            SaveErrorKind::MissingDirectory(path) => {
                write!(f, "GD save folder not found: {}", path.display())
            }
        }
    }
}

impl From<SaveError> for crate::Error {
    fn from(error: SaveError) -> Self {
        use crate::ErrorKind;
        match error.kind {
            SaveErrorKind::Io(err) => crate::Error::from(err),
            SaveErrorKind::CorruptData(msg) => ErrorKind::CorruptData { msg }.into(),
            SaveErrorKind::NotFound(what) => ErrorKind::NotFound { what }.into(),
            SaveErrorKind::MissingDirectory(path) => ErrorKind::NotFound {
                what: format!("save folder {}", path.display()),
            }
            .into(),
        }
    }
}
