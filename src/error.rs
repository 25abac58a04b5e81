use thiserror::Error;

/// Everything that can end a lookup attempt without a usable reply.
///
/// The `Display` text is what the screen shows to the user.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Pincode must be exactly 6 digits")]
    InvalidPincode,

    /// the body was JSON, but not the shape the service documents
    #[error("Invalid response from server")]
    Protocol(String),

    #[error("Failed to fetch data. Please try again.")]
    Http(#[from] reqwest::Error),

    /// the body could not be read as JSON at all
    #[error("Failed to fetch data. Please try again.")]
    Body(#[from] serde_json::Error),
}

impl LookupError {
    /// transport failures are the only ones worth a diagnostic log line
    pub fn is_transport(&self) -> bool {
        matches!(self, LookupError::Http(_) | LookupError::Body(_))
    }
}
