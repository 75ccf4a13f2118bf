use std::error::Error;
use std::fmt;

/// Boxed error type raised by user code (transform validation and expansion).
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error raised by a transform's own code.
///
/// Displays exactly as the user's error does, so whatever reaches the caller reads as
/// rooted in their code rather than in graph-construction plumbing.
#[derive(thiserror::Error)]
#[error("{cause}")]
pub struct UserCodeError {
    #[source]
    cause: BoxError,
}

impl UserCodeError {
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// Borrow the original error.
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Recover the original error.
    pub fn into_inner(self) -> BoxError {
        self.cause
    }
}

impl fmt::Debug for UserCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserCodeError").field(&self.cause).finish()
    }
}
