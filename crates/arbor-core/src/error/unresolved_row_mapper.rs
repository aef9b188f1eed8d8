use super::Error;

/// Error when a query return type has neither a registered row mapper nor
/// entity metadata to derive one from.
#[derive(Debug)]
pub(super) struct UnresolvedRowMapperError {
    ty: Box<str>,
}

impl std::error::Error for UnresolvedRowMapperError {}

impl core::fmt::Display for UnresolvedRowMapperError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no row mapper for `{}`", self.ty)
    }
}

impl Error {
    /// Creates an unresolved row mapper error for the given type name.
    pub fn unresolved_row_mapper(ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvedRowMapper(
            UnresolvedRowMapperError {
                ty: ty.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unresolved row mapper error.
    pub fn is_unresolved_row_mapper(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvedRowMapper(_))
    }
}
