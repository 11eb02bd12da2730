use super::Error;

/// Error when a field read, conversion, write, or manual transform fails
/// during plan execution.
///
/// Writes committed before the failure are not rolled back; the destination
/// instance is left partially mapped.
#[derive(Debug)]
pub(super) struct MappingError {
    message: Box<str>,
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mapping failed: {}", self.message)
    }
}

impl Error {
    /// Creates a mapping error naming the failed operation and field.
    pub fn mapping_field(operation: &str, field: &str) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            message: format!("could not {operation} field `{field}`").into(),
        }))
    }

    /// Creates a mapping error naming the source and destination shapes of a
    /// failed manual transform.
    pub fn mapping_transform(source: &str, destination: &str) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            message: format!("manual transform failed for `{source} -> {destination}`").into(),
        }))
    }

    /// Returns `true` if this error is a mapping error.
    pub fn is_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Mapping(_))
    }
}
