//! Simulated fetch operations.
//!
//! [`SimulatedFetcher`] wraps every [`FixtureStore`] lookup in three steps:
//!
//! 1. Suspend for the operation's configured latency.
//! 2. Draw a ratio from the random provider; below the failure probability
//!    the call fails with the operation's error.
//! 3. Run the lookup.
//!
//! Every step is counted in [`FetchStats`], which lets tests assert that a
//! stage was never reached after an earlier failure.

use async_trait::async_trait;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::FetchConfiguration;
use crate::error::{ConfigError, FetchError, FetchResult};
use crate::fixtures::{Comment, FixtureStore, Post, PostId, Profile, UserId};
use crate::providers::{Providers, RandomProvider, TimeProvider};

/// The three simulated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Profile lookup by user id.
    Profile,
    /// Posts lookup by user id.
    Posts,
    /// Comments lookup by post id.
    Comments,
}

impl Operation {
    /// All operations in pipeline order.
    pub const ALL: [Operation; 3] = [Operation::Profile, Operation::Posts, Operation::Comments];

    /// Short lowercase name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Profile => "profile",
            Operation::Posts => "posts",
            Operation::Comments => "comments",
        }
    }

    /// The error reported when failure injection fires for this operation.
    pub fn injected_error(self) -> FetchError {
        match self {
            Operation::Profile => FetchError::ProfileFetch,
            Operation::Posts => FetchError::PostsFetch,
            Operation::Comments => FetchError::CommentsFetch,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of profiles, posts and comments.
///
/// Orchestrators only depend on this trait, so they can be driven by a
/// [`SimulatedFetcher`] or by any hand-written double.
#[async_trait(?Send)]
pub trait Fetcher {
    /// Fetch the profile of `user_id`.
    ///
    /// Returns [`FetchError::UserNotFound`] if no such profile exists.
    async fn fetch_profile(&self, user_id: UserId) -> FetchResult<Profile>;

    /// Fetch every post of `user_id`. An unknown user has no posts.
    async fn fetch_posts(&self, user_id: UserId) -> FetchResult<Vec<Post>>;

    /// Fetch every comment of `post_id`.
    ///
    /// `None` is the absent-post sentinel and yields no comments.
    async fn fetch_comments(&self, post_id: Option<PostId>) -> FetchResult<Vec<Comment>>;
}

/// Call counters for one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
    /// Calls that entered the operation.
    pub attempts: u64,
    /// Calls failed by failure injection.
    pub injected_failures: u64,
    /// Calls that reached the fixture lookup.
    pub lookups: u64,
}

/// Call counters for all operations of one fetcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    profile: OperationStats,
    posts: OperationStats,
    comments: OperationStats,
}

impl FetchStats {
    /// Counters of a single operation.
    pub fn get(&self, operation: Operation) -> OperationStats {
        match operation {
            Operation::Profile => self.profile,
            Operation::Posts => self.posts,
            Operation::Comments => self.comments,
        }
    }

    fn get_mut(&mut self, operation: Operation) -> &mut OperationStats {
        match operation {
            Operation::Profile => &mut self.profile,
            Operation::Posts => &mut self.posts,
            Operation::Comments => &mut self.comments,
        }
    }

    /// Total calls across all operations.
    pub fn total_attempts(&self) -> u64 {
        Operation::ALL.iter().map(|op| self.get(*op).attempts).sum()
    }
}

/// A [`Fetcher`] over a fixture store with simulated latency and faults.
///
/// ```rust
/// use mockfetch::{Fetcher, FetchConfiguration, FixtureStore, SimProviders, SimulatedFetcher};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let fetcher = SimulatedFetcher::new(
///     FixtureStore::reference(),
///     FetchConfiguration::fast_local(),
///     SimProviders::seeded(7),
/// )
/// .unwrap();
/// let profile = fetcher.fetch_profile(1).await.unwrap();
/// assert_eq!(profile.name, "Navi");
/// # });
/// ```
pub struct SimulatedFetcher<P: Providers> {
    store: Rc<FixtureStore>,
    config: FetchConfiguration,
    providers: P,
    stats: RefCell<FetchStats>,
}

impl<P: Providers> SimulatedFetcher<P> {
    /// Create a fetcher that owns its fixture store.
    ///
    /// Fails if any failure probability in `config` lies outside `0.0..=1.0`.
    pub fn new(
        store: FixtureStore,
        config: FetchConfiguration,
        providers: P,
    ) -> Result<Self, ConfigError> {
        Self::with_shared_store(Rc::new(store), config, providers)
    }

    /// Create a fetcher over a store shared with other fetchers.
    ///
    /// Only the store is shared. Configuration, providers and call counters
    /// belong to this fetcher.
    pub fn with_shared_store(
        store: Rc<FixtureStore>,
        config: FetchConfiguration,
        providers: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            providers,
            stats: RefCell::new(FetchStats::default()),
        })
    }

    /// The provider bundle.
    pub fn providers(&self) -> &P {
        &self.providers
    }

    /// Snapshot of the call counters.
    pub fn stats(&self) -> FetchStats {
        self.stats.borrow().clone()
    }

    async fn simulate<T>(
        &self,
        operation: Operation,
        lookup: impl FnOnce(&FixtureStore) -> FetchResult<T>,
    ) -> FetchResult<T> {
        let settings = self.config.operation(operation);
        self.stats.borrow_mut().get_mut(operation).attempts += 1;

        self.providers.time().sleep(settings.latency).await;

        if self
            .providers
            .random()
            .random_bool(settings.failure_probability)
        {
            self.stats.borrow_mut().get_mut(operation).injected_failures += 1;
            tracing::debug!(%operation, "injected fetch failure");
            return Err(operation.injected_error());
        }

        self.stats.borrow_mut().get_mut(operation).lookups += 1;
        lookup(&self.store)
    }
}

#[async_trait(?Send)]
impl<P: Providers> Fetcher for SimulatedFetcher<P> {
    async fn fetch_profile(&self, user_id: UserId) -> FetchResult<Profile> {
        tracing::debug!(user_id, "fetching profile");
        self.simulate(Operation::Profile, |store| {
            store
                .profile(user_id)
                .cloned()
                .ok_or(FetchError::UserNotFound { user_id })
        })
        .await
    }

    async fn fetch_posts(&self, user_id: UserId) -> FetchResult<Vec<Post>> {
        tracing::debug!(user_id, "fetching posts");
        self.simulate(Operation::Posts, |store| Ok(store.posts(user_id).to_vec()))
            .await
    }

    async fn fetch_comments(&self, post_id: Option<PostId>) -> FetchResult<Vec<Comment>> {
        tracing::debug!(?post_id, "fetching comments");
        self.simulate(Operation::Comments, |store| {
            Ok(store.comments(post_id).to_vec())
        })
        .await
    }
}
