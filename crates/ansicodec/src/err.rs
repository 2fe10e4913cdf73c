//! Helper module with this crate's error type.
//!
//! Codec errors are programmer errors, i.e., invalid arguments or options, or
//! failures of the output sink. Malformed input never results in an error;
//! the tokenizer surfaces it as tokens instead. Codec errors seamlessly
//! convert to I/O errors.

/// The enumeration of error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A row, column, region bound, or other argument violates its minimum.
    OutOfRange,
    /// A tokenizer limit is zero.
    InvalidOption,
    /// The output sink failed.
    BadSink,
    /// A token does not encode the requested input event.
    NotAnEvent,
}

impl ErrorKind {
    /// Turn the error kind to an error message.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::OutOfRange => "argument out of range",
            Self::InvalidOption => "tokenizer limits must be positive",
            Self::BadSink => "error writing to output sink",
            Self::NotAnEvent => "token does not encode the input event",
        }
    }
}

impl From<ErrorKind> for std::io::Error {
    fn from(value: ErrorKind) -> Self {
        Error::from(value).into()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind, source: None }
    }
}

/// A codec error.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<std::io::Error>,
}

impl Error {
    /// Create a new bad sink error.
    pub fn bad_sink(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::BadSink,
            source: Some(source),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.kind.as_str())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self {
            kind: ErrorKind::BadSink,
            source: Some(ref error),
        } = *self
        {
            Some(error)
        } else {
            None
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::bad_sink(value)
    }
}

impl From<core::fmt::Error> for Error {
    fn from(value: core::fmt::Error) -> Self {
        Error::bad_sink(std::io::Error::other(value))
    }
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        use self::ErrorKind::*;

        match value.kind {
            OutOfRange | InvalidOption => Self::new(std::io::ErrorKind::InvalidInput, value),
            NotAnEvent => Self::new(std::io::ErrorKind::InvalidData, value),
            BadSink => {
                if let Some(error) = value.source {
                    error
                } else {
                    Self::other(value)
                }
            }
        }
    }
}

/// A specialized result type for this crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::{Error, ErrorKind};
    use std::error::Error as _;

    #[test]
    fn test_conversion() {
        let error = Error::from(ErrorKind::OutOfRange);
        assert_eq!(error.kind(), ErrorKind::OutOfRange);
        assert_eq!(format!("{}", error), "argument out of range");
        assert!(error.source().is_none());

        let io = std::io::Error::from(ErrorKind::InvalidOption);
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidInput);

        let error = Error::from(core::fmt::Error);
        assert_eq!(error.kind(), ErrorKind::BadSink);
        assert!(error.source().is_some());

        let error = Error::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        let io = std::io::Error::from(error);
        assert_eq!(io.kind(), std::io::ErrorKind::BrokenPipe);
    }
}
