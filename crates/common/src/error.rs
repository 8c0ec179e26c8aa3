//! Error types shared across Funheat crates.

/// Top-level error type for Funheat operations.
#[derive(Debug, thiserror::Error)]
pub enum FunheatError {
    #[error("Malformed script {origin}: {message}")]
    MalformedInput { origin: String, message: String },

    #[error("No valid actions in {origin}")]
    EmptyActions { origin: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result type alias using FunheatError.
pub type FunheatResult<T> = Result<T, FunheatError>;

impl FunheatError {
    pub fn malformed(origin: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedInput {
            origin: origin.into(),
            message: msg.into(),
        }
    }

    pub fn empty_actions(origin: impl Into<String>) -> Self {
        Self::EmptyActions {
            origin: origin.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the failure came from the input document rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::EmptyActions { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_origin() {
        let err = FunheatError::malformed("scene.funscript", "actions list missing");
        assert_eq!(
            err.to_string(),
            "Malformed script scene.funscript: actions list missing"
        );

        let err = FunheatError::empty_actions("scene.funscript");
        assert_eq!(err.to_string(), "No valid actions in scene.funscript");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(FunheatError::empty_actions("x").is_input_error());
        assert!(FunheatError::malformed("x", "y").is_input_error());
        assert!(!FunheatError::config("bad").is_input_error());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!FunheatError::from(io).is_input_error());
    }

    #[test]
    fn test_encoder_errors_convert() {
        use image::error::{LimitError, LimitErrorKind};

        let limit = image::ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError));
        let err = FunheatError::from(limit);
        assert!(matches!(err, FunheatError::Image(_)));
        assert!(!err.is_input_error());
    }
}
