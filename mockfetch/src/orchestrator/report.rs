//! Run reports and the recorder orchestrators write them through.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::error::{FetchError, FetchResult};
use crate::fixtures::{Comment, Post, Profile, UserId};
use crate::providers::TimeProvider;

use super::state::FetchState;

/// Line logged once every stage of a run has succeeded.
pub const SUCCESS_LINE: &str = "All data retrieved successfully";

/// How the three fetches are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Await each fetch inline, one after another.
    Sequential,
    /// Await profile and posts together, then comments.
    Parallel,
    /// Register each stage as a continuation of the previous one.
    Chained,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Parallel, Strategy::Chained];

    /// Header printed above the run's progress lines.
    pub fn title(self) -> &'static str {
        match self {
            Strategy::Sequential => "Sequential Fetch",
            Strategy::Parallel => "Parallel Fetch",
            Strategy::Chained => "Fetch with Promise Chaining",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Everything a successful run retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedData {
    /// The user's profile.
    pub profile: Profile,
    /// The user's posts.
    pub posts: Vec<Post>,
    /// Comments on the first post, empty if the user has no posts.
    pub comments: Vec<Comment>,
}

/// A state entered during a run, with the provider time it was entered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    /// The state entered.
    pub state: FetchState,
    /// Time since the start of the run.
    pub at: Duration,
}

/// Outcome of one orchestration run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    /// The strategy that produced this report.
    pub strategy: Strategy,
    /// The user the run fetched for.
    pub user_id: UserId,
    /// Human-readable progress lines, in emission order.
    pub lines: Vec<String>,
    /// Every state entered, starting with `Idle`.
    pub transitions: Vec<StateTransition>,
    /// Provider time from start to terminal state.
    pub elapsed: Duration,
    /// Retrieved data or the error that stopped the run.
    pub outcome: FetchResult<FetchedData>,
}

impl FetchReport {
    /// Returns true if every stage succeeded.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Retrieved data of a successful run.
    pub fn data(&self) -> Option<&FetchedData> {
        self.outcome.as_ref().ok()
    }

    /// Error that stopped a failed run.
    pub fn error(&self) -> Option<&FetchError> {
        self.outcome.as_ref().err()
    }

    /// States entered, in order.
    pub fn states(&self) -> Vec<FetchState> {
        self.transitions.iter().map(|t| t.state).collect()
    }

    /// Last state entered.
    pub fn final_state(&self) -> FetchState {
        self.transitions
            .last()
            .map_or(FetchState::Idle, |t| t.state)
    }

    /// Progress lines, without the trailing `Error:` line of a failed run.
    pub fn progress_lines(&self) -> &[String] {
        match self.error_line() {
            Some(_) => &self.lines[..self.lines.len() - 1],
            None => &self.lines,
        }
    }

    /// The `Error:` line a failed run ends with.
    pub fn error_line(&self) -> Option<&str> {
        if self.is_success() {
            return None;
        }
        self.lines.last().map(String::as_str)
    }

    /// Time at which `state` was first entered.
    pub fn entered_at(&self, state: FetchState) -> Option<Duration> {
        self.transitions
            .iter()
            .find(|t| t.state == state)
            .map(|t| t.at)
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.strategy)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Mutable state of a run in progress.
///
/// Each strategy drives one recorder from `Idle` to a terminal state and
/// turns it into a [`FetchReport`] with [`finish`](Self::finish).
pub(crate) struct RunRecorder<'a, T: TimeProvider> {
    strategy: Strategy,
    user_id: UserId,
    time: &'a T,
    started: Duration,
    lines: Vec<String>,
    transitions: Vec<StateTransition>,
}

impl<'a, T: TimeProvider> RunRecorder<'a, T> {
    pub(crate) fn start(strategy: Strategy, user_id: UserId, time: &'a T) -> Self {
        tracing::info!(%strategy, user_id, "starting fetch run");
        Self {
            strategy,
            user_id,
            time,
            started: time.now(),
            lines: Vec::new(),
            transitions: vec![StateTransition {
                state: FetchState::Idle,
                at: Duration::ZERO,
            }],
        }
    }

    fn current(&self) -> FetchState {
        self.transitions
            .last()
            .map_or(FetchState::Idle, |t| t.state)
    }

    pub(crate) fn enter(&mut self, next: FetchState) {
        let current = self.current();
        debug_assert!(
            current.can_transition_to(next),
            "illegal transition {} -> {}",
            current,
            next
        );
        if !current.can_transition_to(next) {
            tracing::error!(%current, %next, "illegal fetch state transition");
            return;
        }
        tracing::trace!(strategy = %self.strategy, state = %next, "state transition");
        self.transitions.push(StateTransition {
            state: next,
            at: self.time.now().saturating_sub(self.started),
        });
    }

    /// Log a labelled record rendered as JSON.
    pub(crate) fn record<V: Serialize + ?Sized>(&mut self, label: &str, value: &V) {
        let rendered = serde_json::to_string(value)
            .unwrap_or_else(|e| format!("<unserializable: {}>", e));
        self.lines.push(format!("{}: {}", label, rendered));
    }

    pub(crate) fn finish(mut self, outcome: FetchResult<FetchedData>) -> FetchReport {
        match &outcome {
            Ok(_) => {
                self.enter(FetchState::Done);
                self.lines.push(SUCCESS_LINE.to_string());
            }
            Err(error) => {
                self.enter(FetchState::Failed);
                self.lines.push(format!("Error: {}", error));
            }
        }

        let elapsed = self.time.now().saturating_sub(self.started);
        match &outcome {
            Ok(_) => tracing::info!(
                strategy = %self.strategy,
                user_id = self.user_id,
                ?elapsed,
                "fetch run completed"
            ),
            Err(error) => tracing::warn!(
                strategy = %self.strategy,
                user_id = self.user_id,
                %error,
                injected = error.is_injected(),
                ?elapsed,
                "fetch run failed"
            ),
        }

        FetchReport {
            strategy: self.strategy,
            user_id: self.user_id,
            lines: self.lines,
            transitions: self.transitions,
            elapsed,
            outcome,
        }
    }
}
