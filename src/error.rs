use std::{fmt, io};

use serde::ser;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// The output sink rejected a write.
    Io(io::Error),
    /// A value had a shape with no Storable encoding (maps, units, `None`, ...). Holds the serde
    /// shape name.
    UnsupportedShape(&'static str),
    /// A scalar's text form didn't fit in the one-byte length field.
    ScalarTooLong { len: usize },
    /// An element count, entry count, or key length didn't fit in the four-byte length field.
    LengthTooLong { max: usize, actual: usize },
    /// Aggregates and references nested deeper than the configured limit.
    DepthLimit(usize),
    /// Occurs when a `Serialize` implementation reports its own failure
    SerdeFail(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "Failed writing to output: {}", err),
            Error::UnsupportedShape(shape) => {
                write!(f, "Storable has no encoding for a {} value", shape)
            }
            Error::ScalarTooLong { len } => write!(
                f,
                "Scalar too long: was {} bytes, maximum allowed is {}",
                len,
                crate::MAX_SCALAR_LEN
            ),
            Error::LengthTooLong { max, actual } => write!(
                f,
                "Length too long: was {}, maximum allowed is {}",
                actual, max
            ),
            Error::DepthLimit(max) => write!(f, "Nesting depth exceeded limit of {}", max),
            Error::SerdeFail(ref msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::SerdeFail(msg.to_string())
    }
}
