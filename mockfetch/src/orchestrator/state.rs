//! Progress state machine shared by every orchestration strategy.
//!
//! ```text
//! Idle -> FetchingProfile -> FetchingPosts -> FetchingComments -> Done
//!              |                  |                  |
//!              +------------------+------------------+----> Failed
//! ```

use std::fmt;

/// Where an orchestration run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchState {
    /// Not started.
    Idle,
    /// Waiting on the profile fetch.
    FetchingProfile,
    /// Waiting on the posts fetch.
    FetchingPosts,
    /// Waiting on the comments fetch.
    FetchingComments,
    /// Every stage succeeded.
    Done,
    /// A stage failed and the run stopped.
    Failed,
}

impl FetchState {
    /// Returns true for `Done` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, FetchState::Done | FetchState::Failed)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: FetchState) -> bool {
        use FetchState::*;
        match (self, next) {
            (Idle, FetchingProfile)
            | (FetchingProfile, FetchingPosts)
            | (FetchingPosts, FetchingComments)
            | (FetchingComments, Done) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchState::Idle => "idle",
            FetchState::FetchingProfile => "fetching-profile",
            FetchState::FetchingPosts => "fetching-posts",
            FetchState::FetchingComments => "fetching-comments",
            FetchState::Done => "done",
            FetchState::Failed => "failed",
        };
        f.write_str(name)
    }
}
