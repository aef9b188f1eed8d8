use super::Error;

/// Error when a keyed collection's key cannot be written to a key column.
#[derive(Debug)]
pub(super) struct UnsupportedKeyTypeError {
    path: Box<str>,
    key: Box<str>,
}

impl std::error::Error for UnsupportedKeyTypeError {}

impl core::fmt::Display for UnsupportedKeyTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported key type at `{}`: {} is not a simple type",
            self.path, self.key
        )
    }
}

impl Error {
    /// Creates an unsupported key type error for the collection at `path`.
    pub fn unsupported_key_type(path: impl Into<String>, key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedKeyType(
            UnsupportedKeyTypeError {
                path: path.into().into(),
                key: key.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported key type error.
    pub fn is_unsupported_key_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedKeyType(_))
    }
}
