use thiserror::Error;

/// Failure classification for a weather lookup.
///
/// The provider's own error detail is deliberately collapsed: an unknown
/// city and any other provider-side rejection both surface as [`NotFound`],
/// since the caller renders a single message either way.
///
/// [`NotFound`]: LookupError::NotFound
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please enter a city name.")]
    InvalidInput,

    #[error("City not found or API error.")]
    NotFound,

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Location unavailable.")]
    LocationUnavailable,

    #[error("Location access denied.")]
    PermissionDenied,
}
