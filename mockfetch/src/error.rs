//! Error types for simulated fetches and configuration.

use thiserror::Error;

use crate::fixtures::UserId;

/// Errors produced by a simulated fetch operation.
///
/// The three `*Fetch` variants are transient faults injected by the
/// simulator. [`FetchError::UserNotFound`] is a lookup miss in the
/// fixture store and is never injected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Injected failure of the profile fetch.
    #[error("Failed to fetch user profile")]
    ProfileFetch,

    /// Injected failure of the posts fetch.
    #[error("Failed to fetch posts")]
    PostsFetch,

    /// Injected failure of the comments fetch.
    #[error("Failed to fetch comments")]
    CommentsFetch,

    /// The requested user has no profile in the fixture store.
    #[error("User not found")]
    UserNotFound {
        /// The user id that was looked up.
        user_id: UserId,
    },
}

impl FetchError {
    /// Returns true if this error was produced by failure injection rather
    /// than by a fixture lookup.
    pub fn is_injected(&self) -> bool {
        !matches!(self, FetchError::UserNotFound { .. })
    }
}

/// A type alias for `Result<T, FetchError>`.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors raised while validating a [`FetchConfiguration`](crate::FetchConfiguration).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A failure probability outside of `0.0..=1.0` (or NaN).
    #[error("invalid failure probability for {operation}: {value} (expected 0.0..=1.0)")]
    InvalidProbability {
        /// Name of the offending operation.
        operation: &'static str,
        /// The rejected value.
        value: f64,
    },
}
