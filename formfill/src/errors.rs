use thiserror::Error;

/// Failures reported by the underlying UI-automation driver.
///
/// The form engine never raises these itself. They are for
/// [`UIElementImpl`](crate::UIElementImpl) implementors and pass through
/// [`FormError::Automation`] unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Element is not enabled: {0}")]
    ElementNotEnabled(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while building fields or completing a form.
#[derive(Error, Debug)]
pub enum FormError {
    /// A configuration choice (value source, send method, ...) is not supported.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A field received a value of the wrong kind.
    #[error("Value type error: {0}")]
    ValueType(String),

    /// The value could not be reached, e.g. a combo box option that does not exist.
    #[error("Unable to set value: {0}")]
    UnableToSetValue(String),

    /// A field did not hold its expected value after filling.
    #[error("Values in form '{form_id}' do not match")]
    VerificationMismatch { form_id: String },

    /// Every attempt to complete the form failed verification.
    #[error("Fatal error in form: '{form_id}'!")]
    Fatal { form_id: String },

    /// A binding was given with an unsupported shape.
    #[error("Invalid form arguments: {0}")]
    FormArguments(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Automation(#[from] AutomationError),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Config(err.to_string())
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::Config(err.to_string())
    }
}
