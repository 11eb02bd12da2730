use super::Error;

/// Error when a mapping plan cannot be built or resolved.
///
/// This occurs when:
/// - No conventions are registered when a plan needs convention matching
/// - A candidate field pair violates readability/writability requirements
/// - Two fields have mismatched declared types and no conversion is
///   registered for that ordered type pair
/// - No plan exists for a shape pair and auto-creation is disabled
/// - A map is registered twice for the same shape pair
///
/// These errors surface a configuration problem, not a per-instance
/// condition; they are caught at build time or on first resolution.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
