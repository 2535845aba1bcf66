//! # mockfetch
//!
//! Simulated asynchronous data fetching with injectable latency and faults,
//! and three orchestration strategies built on top of it.
//!
//! The crate is a small harness for exercising async composition: every
//! fetch waits through a [`TimeProvider`], rolls its failure gate through a
//! [`RandomProvider`], then reads a read-only [`FixtureStore`]. Swapping the
//! providers turns a random demo into a reproducible test.
//!
//! ## Components
//!
//! - [`FixtureStore`]: profiles, posts and comments keyed by id
//! - [`FetchConfiguration`]: per-operation latency and failure probability
//! - [`SimulatedFetcher`]: the [`Fetcher`] that applies both
//! - [`orchestrator`]: sequential, parallel and chained composition
//!
//! ## Quick Start
//!
//! ```rust
//! use mockfetch::{
//!     fetch_sequential, FetchConfiguration, FixtureStore, Providers, SimProviders,
//!     SimulatedFetcher,
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let fetcher = SimulatedFetcher::new(
//!     FixtureStore::reference(),
//!     FetchConfiguration::fast_local(),
//!     SimProviders::seeded(1),
//! )
//! .unwrap();
//! let report = fetch_sequential(&fetcher, fetcher.providers().time(), 1).await;
//! assert!(report.is_success());
//! println!("{report}");
//! # });
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod config;
mod error;
mod fetch;
mod fixtures;
pub mod orchestrator;
mod providers;

pub use config::{FetchConfiguration, OperationConfig, REFERENCE_FAILURE_PROBABILITY};
pub use error::{ConfigError, FetchError, FetchResult};
pub use fetch::{FetchStats, Fetcher, Operation, OperationStats, SimulatedFetcher};
pub use fixtures::{Comment, CommentId, FixtureStore, Post, PostId, Profile, UserId};
pub use orchestrator::{
    fetch_chained, fetch_parallel, fetch_sequential, run_demo, run_strategy, FetchReport,
    FetchState, FetchedData, StateTransition, Strategy, DEMO_PLAN, SUCCESS_LINE,
};
pub use providers::{
    Providers, RandomProvider, ScriptedRandomProvider, SeededRandomProvider, SimProviders,
    TimeProvider, TokioProviders, TokioRandomProvider, TokioTimeProvider,
};
