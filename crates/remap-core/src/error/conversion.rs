use super::Error;

/// Error when a registered conversion function fails while transforming a
/// value.
///
/// Names the runtime type of the offending value; the original failure is
/// attached as the error's cause.
#[derive(Debug)]
pub(super) struct ConversionError {
    value_ty: &'static str,
}

impl std::error::Error for ConversionError {}

impl core::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "conversion failed for value of type `{}`", self.value_ty)
    }
}

impl Error {
    /// Creates a conversion error naming the runtime type of the value that
    /// could not be converted.
    pub fn conversion(value_ty: &'static str) -> Error {
        Error::from(super::ErrorKind::Conversion(ConversionError { value_ty }))
    }

    /// Returns `true` if this error is a conversion error.
    pub fn is_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Conversion(_))
    }
}
