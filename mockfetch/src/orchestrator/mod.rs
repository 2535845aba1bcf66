//! Orchestration strategies over a [`Fetcher`].
//!
//! Three ways to compose the same three fetches:
//!
//! | Strategy | Profile + posts | Comments | Expected latency (reference config) |
//! |----------|-----------------|----------|-------------------------------------|
//! | [`fetch_sequential`] | one after another | after posts | 1000 + 1500 + 2000ms |
//! | [`fetch_parallel`] | joined | after the join | max(1000, 1500) + 2000ms |
//! | [`fetch_chained`] | continuation chain | last continuation | 1000 + 1500 + 2000ms |
//!
//! Every strategy catches its own failures and returns a [`FetchReport`];
//! a failed run never affects another run.

mod chained;
mod parallel;
mod report;
mod sequential;
mod state;

pub use chained::fetch_chained;
pub use parallel::fetch_parallel;
pub use report::{FetchReport, FetchedData, StateTransition, Strategy, SUCCESS_LINE};
pub use sequential::fetch_sequential;
pub use state::FetchState;

use crate::fetch::Fetcher;
use crate::fixtures::UserId;
use crate::providers::TimeProvider;

/// Strategies and users the demo binary runs, in order.
pub const DEMO_PLAN: [(Strategy, UserId); 3] = [
    (Strategy::Sequential, 1),
    (Strategy::Parallel, 2),
    (Strategy::Chained, 1),
];

/// Run a single strategy for `user_id`.
pub async fn run_strategy<F, T>(
    strategy: Strategy,
    fetcher: &F,
    time: &T,
    user_id: UserId,
) -> FetchReport
where
    F: Fetcher + ?Sized,
    T: TimeProvider,
{
    match strategy {
        Strategy::Sequential => fetch_sequential(fetcher, time, user_id).await,
        Strategy::Parallel => fetch_parallel(fetcher, time, user_id).await,
        Strategy::Chained => fetch_chained(fetcher, time, user_id).await,
    }
}

/// Run every entry of [`DEMO_PLAN`] one after another.
///
/// Each run completes before the next starts. A failed run is reported and
/// the next one still executes.
pub async fn run_demo<F, T>(fetcher: &F, time: &T) -> Vec<FetchReport>
where
    F: Fetcher + ?Sized,
    T: TimeProvider,
{
    let mut reports = Vec::with_capacity(DEMO_PLAN.len());
    for (strategy, user_id) in DEMO_PLAN {
        reports.push(run_strategy(strategy, fetcher, time, user_id).await);
    }
    reports
}
