use thiserror::Error;

/// Why a lead cannot be dispatched yet. Never shown to the visitor, the
/// submit button simply stays disabled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("email address is missing or malformed")]
    InvalidEmail,
    #[error("phone number is not a valid international number")]
    InvalidPhone,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunnelError {
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("meta pixel is not loaded")]
    PixelUnavailable,
    #[error("meta pixel call failed: {0}")]
    Pixel(String),
    #[error("browser environment unavailable: {0}")]
    Environment(String),
    #[error("invalid lead: {0}")]
    Validation(#[from] ValidationError),
}

impl From<gloo_net::Error> for FunnelError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => FunnelError::Decode(e.to_string()),
            other => FunnelError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for FunnelError {
    fn from(err: serde_json::Error) -> Self {
        FunnelError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_into_funnel_errors() {
        let err: FunnelError = ValidationError::InvalidPhone.into();
        assert_eq!(err, FunnelError::Validation(ValidationError::InvalidPhone));
        assert_eq!(
            err.to_string(),
            "invalid lead: phone number is not a valid international number"
        );
    }

    #[test]
    fn rejected_status_is_reported() {
        let err = FunnelError::Rejected { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
