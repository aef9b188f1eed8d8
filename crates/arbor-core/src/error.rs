mod adhoc;
mod driver;
mod identifier_generation;
mod invalid_statement;
mod mapping_configuration;
mod record_not_found;
mod too_many_records;
mod type_conversion;
mod unresolved_row_mapper;
mod unsupported_key_type;

use adhoc::AdhocError;
use driver::DriverError;
use identifier_generation::IdentifierGenerationError;
use invalid_statement::InvalidStatementError;
use mapping_configuration::MappingConfigurationError;
use record_not_found::RecordNotFoundError;
use std::{fmt, sync::Arc};
use too_many_records::TooManyRecordsError;
use type_conversion::TypeConversionError;
use unresolved_row_mapper::UnresolvedRowMapperError;
use unsupported_key_type::UnsupportedKeyTypeError;

/// Return early with an ad-hoc error built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Arbor.
///
/// The error is a single pointer wide. Store errors reported by a driver are
/// carried as the error's source without altering their message, so callers
/// can roll back their transaction based on the original cause.
#[derive(Clone)]
pub struct Error {
    kind: Arc<ErrorKind>,
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err.inner.as_ref()),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ErrorKind::Anyhow(err) => fmt::Display::fmt(err, f),
            ErrorKind::Adhoc(err) => fmt::Display::fmt(err, f),
            ErrorKind::Driver(err) => fmt::Display::fmt(err, f),
            ErrorKind::IdentifierGeneration(err) => fmt::Display::fmt(err, f),
            ErrorKind::InvalidStatement(err) => fmt::Display::fmt(err, f),
            ErrorKind::MappingConfiguration(err) => fmt::Display::fmt(err, f),
            ErrorKind::RecordNotFound(err) => fmt::Display::fmt(err, f),
            ErrorKind::TooManyRecords(err) => fmt::Display::fmt(err, f),
            ErrorKind::TypeConversion(err) => fmt::Display::fmt(err, f),
            ErrorKind::UnresolvedRowMapper(err) => fmt::Display::fmt(err, f),
            ErrorKind::UnsupportedKeyType(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_tuple("Error").field(self.kind()).finish()
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Driver(DriverError),
    IdentifierGeneration(IdentifierGenerationError),
    InvalidStatement(InvalidStatementError),
    MappingConfiguration(MappingConfigurationError),
    RecordNotFound(RecordNotFoundError),
    TooManyRecords(TooManyRecordsError),
    TypeConversion(TypeConversionError),
    UnresolvedRowMapper(UnresolvedRowMapperError),
    UnsupportedKeyType(UnsupportedKeyTypeError),
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
