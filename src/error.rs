//! Error types for analysis submission and decoding.

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error type for the analysis request pipeline.
///
/// Every variant maps to a single user-facing message; none of these are
/// fatal to the application — each failure returns the controller to a
/// stable idle state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    /// Submit attempted with no geometry in the region store.
    #[error("No region selected")]
    EmptySelection,

    /// Runtime-tier submit without a valid session. No network call is made.
    #[error("Sign in to run a full analysis")]
    Unauthenticated,

    /// The service rejected the region (HTTP 400). The detail message is
    /// surfaced to the user verbatim.
    #[error("{0}")]
    Validation(String),

    /// No usable response was received (connection error, timeout).
    #[error("Analysis service unreachable: {0}")]
    Transport(String),

    /// Unexpected non-2xx status without a validation detail.
    #[error("Analysis failed (status {status})")]
    Service { status: u16 },

    /// The response arrived but one of its channels could not be decoded.
    #[error("Could not decode analysis response: {0}")]
    Decode(String),
}

impl AnalysisError {
    /// Whether this failure happened before any network call was issued.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::EmptySelection | Self::Unauthenticated)
    }
}
