use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetingError {
    /// The territory has no usable boundary ring; nothing can be sampled.
    #[error("no boundary geometry for territory {territory_id}")]
    NoBoundary { territory_id: String },

    #[error(transparent)]
    Siblings(#[from] SiblingSourceError),
}

/// Failure reported by an [`crate::AddressResolver`].
///
/// Never fatal to an export; the caller substitutes a fallback label.
#[derive(Debug, Error)]
#[error("address lookup failed: {0}")]
pub struct ResolveError(pub String);

/// Failure reported by a [`crate::SiblingSource`].
#[derive(Debug, Error)]
#[error("sibling territory lookup failed: {0}")]
pub struct SiblingSourceError(pub String);
