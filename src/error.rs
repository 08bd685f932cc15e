use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::PathBuf;

/// A reason why reading a PXPACK file failed.
pub enum ReadError {
    /// IO error, including running out of bytes.
    IoError(io::Error),
    /// Invalid magic string at the start of the file.
    InvalidMagic,
    /// Invalid magic string at the start of the tile layer with this index.
    InvalidLayerMagic(usize),
    /// A value in the file doesn't fit the field it belongs to.
    InvalidField(FieldError),
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::IoError(err)
    }
}

impl From<FieldError> for ReadError {
    fn from(err: FieldError) -> Self {
        ReadError::InvalidField(err)
    }
}

impl Debug for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::IoError(err) => write!(f, "{err}"),
            ReadError::InvalidMagic => write!(f, "found invalid magic string for PXPACK file"),
            ReadError::InvalidLayerMagic(layer) => {
                write!(f, "found invalid magic string for tile layer {}", layer + 1)
            }
            ReadError::InvalidField(err) => write!(f, "found invalid field: {err:?}"),
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::IoError(err) => Some(err),
            ReadError::InvalidField(err) => Some(err),
            _ => None,
        }
    }
}

/// A value was rejected because it is out of range for its field.
///
/// The field keeps its previous value when this is returned.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A string was longer than its field allows.
    TooLong {
        /// Name of the field.
        field: String,
        /// Maximum length of the field, in bytes.
        max: usize,
        /// Length of the rejected value, in bytes.
        actual: usize,
    },
    /// An index or coordinate was out of bounds.
    OutOfBounds {
        /// Name of the indexed collection.
        field: String,
        /// The rejected index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },
    /// The entity list is already full.
    TooManyEntities,
}

impl FieldError {
    pub(crate) fn check_len(field: impl Into<String>, value: &[u8], max: usize) -> Result<(), Self> {
        if value.len() > max {
            return Err(FieldError::TooLong {
                field: field.into(),
                max,
                actual: value.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_index(field: impl Into<String>, index: usize, len: usize) -> Result<(), Self> {
        if index >= len {
            return Err(FieldError::OutOfBounds {
                field: field.into(),
                index,
                len,
            });
        }
        Ok(())
    }
}

impl Debug for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::TooLong { field, max, actual } => write!(
                f,
                "{field} is {actual} bytes long, but can be at most {max} bytes"
            ),
            FieldError::OutOfBounds { field, index, len } => {
                write!(f, "index {index} is out of bounds for {field} of length {len}")
            }
            FieldError::TooManyEntities => write!(
                f,
                "cannot store more than {} entities",
                crate::MAX_NUM_ENTITIES
            ),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for FieldError {}

/// A reason why opening, loading, or saving a PXPACK file failed.
pub enum Error {
    /// Part of the configuration was left empty.
    MissingConfig(&'static str),
    /// A file couldn't be opened.
    Open {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A file couldn't be written or removed.
    Write {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A file was opened, but its contents couldn't be parsed.
    Read {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        source: ReadError,
    },
    /// A value was out of range for its field.
    Field(FieldError),
    /// The map has no filename to save under.
    Unnamed,
    /// The map was renamed onto a file belonging to another map.
    Exists(PathBuf),
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Error::Field(err)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingConfig(what) => {
                write!(f, "{what} must be set before opening a PXPACK file")
            }
            Error::Open { path, source } => {
                write!(f, "failed to open PXPACK file {}: {source}", path.display())
            }
            Error::Write { path, source } => {
                write!(f, "failed to write PXPACK file {}: {source}", path.display())
            }
            Error::Read { path, source } => {
                write!(f, "failed to parse PXPACK file {}: {source}", path.display())
            }
            Error::Field(err) => write!(f, "{err}"),
            Error::Unnamed => write!(f, "cannot save a PXPACK map without a filename"),
            Error::Exists(path) => write!(
                f,
                "cannot save over PXPACK file {}, it belongs to another map",
                path.display()
            ),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } | Error::Write { source, .. } => Some(source),
            Error::Read { source, .. } => Some(source),
            Error::Field(err) => Some(err),
            Error::MissingConfig(_) | Error::Unnamed | Error::Exists(_) => None,
        }
    }
}
