//! Error types for the form model.
//!
//! The form layer has very few failure modes. Invalid configuration is
//! rejected when a widget or configuration is constructed; everything else is
//! prevented structurally (numeric editors clamp, out-of-range selections are
//! ignored). `FormError` therefore only covers configuration problems.

use thiserror::Error;

/// Convenience alias for results using the form error type.
pub type Result<T> = std::result::Result<T, FormError>;

/// Primary error type for the form model.
#[derive(Error, Debug)]
pub enum FormError {
    /// A label layout name that is neither `horizontal` nor `vertical`.
    #[error("Invalid label layout '{0}': expected 'horizontal' or 'vertical'")]
    InvalidLabelLayout(String),

    /// A metadata entry type that is not one of `str`, `float` or `int`.
    #[error("Unknown metadata type '{0}': expected 'str', 'float' or 'int'")]
    UnknownMetadataType(String),

    /// A configured device is inconsistent (e.g. inverted limits).
    #[error("Invalid device '{name}': {reason}")]
    InvalidDevice {
        /// Name of the offending device
        name: String,
        /// Human-readable reason
        reason: String,
    },

    /// The configuration sources could not be merged or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for FormError {
    fn from(err: figment::Error) -> Self {
        FormError::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FormError::InvalidLabelLayout("diagonal".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid label layout 'diagonal': expected 'horizontal' or 'vertical'"
        );

        let err = FormError::InvalidDevice {
            name: "m1".to_string(),
            reason: "low limit above high limit".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid device 'm1': low limit above high limit"
        );
    }
}
