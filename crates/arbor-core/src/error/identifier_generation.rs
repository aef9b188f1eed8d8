use super::Error;

/// Error when an insert for an entity with an identifier property completes
/// without an identifier becoming available.
#[derive(Debug)]
pub(super) struct IdentifierGenerationError {
    entity: Box<str>,
}

impl std::error::Error for IdentifierGenerationError {}

impl core::fmt::Display for IdentifierGenerationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "insert for `{}` completed without an identifier",
            self.entity
        )
    }
}

impl Error {
    /// Creates an identifier generation error for the given entity type.
    pub fn identifier_generation(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::IdentifierGeneration(
            IdentifierGenerationError {
                entity: entity.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an identifier generation error.
    pub fn is_identifier_generation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IdentifierGeneration(_))
    }
}
