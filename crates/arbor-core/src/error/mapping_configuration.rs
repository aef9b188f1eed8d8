use super::Error;

/// Error when an entity's metadata cannot be built.
///
/// This occurs when:
/// - A property's declared type cannot be classified (collections of scalars,
///   nested containers, types without a persistent mapping)
/// - An entity can reach itself through its relations (a back-reference)
/// - Two relations of one entity would share a reverse column
/// - An entity owning relations has no identifier property
///
/// These errors are raised the first time metadata for the type is built.
#[derive(Debug)]
pub(super) struct MappingConfigurationError {
    entity: Box<str>,
    message: Box<str>,
}

impl std::error::Error for MappingConfigurationError {}

impl core::fmt::Display for MappingConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping for `{}`: {}", self.entity, self.message)
    }
}

impl Error {
    /// Creates a mapping configuration error for the given entity type.
    pub fn mapping_configuration(entity: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MappingConfiguration(
            MappingConfigurationError {
                entity: entity.into().into(),
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a mapping configuration error.
    pub fn is_mapping_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MappingConfiguration(_))
    }
}
