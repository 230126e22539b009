//! Error Types

use thiserror::Error;

use crate::validation::FormErrors;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Message shown whenever order details cannot be loaded
pub const ORDER_DETAILS_FAILED: &str = "Failed to fetch order details.";

/// Checkout error types
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// One or more form fields failed validation
    #[error("Form validation failed on {} field(s)", .0.len())]
    Validation(FormErrors),

    /// Request never produced a response (DNS, connection, CORS, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Backend answered 401
    #[error("Unauthorized")]
    Unauthorized,

    /// Response body missing or lacking expected fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Payment provider refused or failed the redirect
    #[error("Payment provider error: {0}")]
    Provider(String),

    /// A checkout is already in flight
    #[error("Checkout already in progress")]
    Busy,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Whether the user can fix this by editing the form
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields.".into(),
            Self::Transport(_) | Self::Http { .. } | Self::MalformedResponse(_) | Self::Json(_) => {
                "Unable to reach the payment service. Please try again.".into()
            }
            Self::Unauthorized => "Your session has expired.".into(),
            Self::Provider(msg) => format!("The payment provider reported an error: {msg}"),
            Self::Busy => "Your checkout is already being prepared.".into(),
            Self::Config(_) => "Payments are not configured.".into(),
        }
    }
}
