use std::fmt;

/// An error that can occur when encoding or decoding level data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// Data failed to decompress or decrypt, or a container was malformed
    CorruptData { msg: String },

    /// Data was well formed but did not follow the layout a codec expects
    /// (missing property, out of range group, oversized payload)
    FormatViolation { msg: String },

    /// A buffer was shorter than the length declared in its header
    Truncated { expected: usize, actual: usize },

    /// A named level or remote id does not exist
    NotFound { what: String },

    /// The level server answered with an error code
    Protocol { code: String },

    /// An underlying IO error
    Io(std::io::Error),

    /// A network transport error
    #[cfg(feature = "http")]
    Http(attohttpc::Error),
}

impl ErrorKind {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        ErrorKind::CorruptData { msg: msg.into() }
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        ErrorKind::FormatViolation { msg: msg.into() }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Io(ref err) => Some(err),
            #[cfg(feature = "http")]
            ErrorKind::Http(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::CorruptData { ref msg } => write!(f, "corrupt data: {}", msg),
            ErrorKind::FormatViolation { ref msg } => write!(f, "invalid level data: {}", msg),
            ErrorKind::Truncated { expected, actual } => write!(
                f,
                "truncated data: expected at least {} bytes but found {}",
                expected, actual
            ),
            ErrorKind::NotFound { ref what } => write!(f, "{} not found", what),
            ErrorKind::Protocol { ref code } => {
                write!(f, "server returned error code: {}", code)
            }
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
            #[cfg(feature = "http")]
            ErrorKind::Http(ref err) => write!(f, "http error: {}", err),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Self {
        Error::new(ErrorKind::corrupt(format!("base64: {}", error)))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Error::new(ErrorKind::corrupt(format!("utf-8: {}", error)))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(ErrorKind::corrupt(format!("json: {}", error)))
    }
}

#[cfg(feature = "http")]
impl From<attohttpc::Error> for Error {
    fn from(error: attohttpc::Error) -> Self {
        Error::new(ErrorKind::Http(error))
    }
}
