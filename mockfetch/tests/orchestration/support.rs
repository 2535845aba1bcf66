//! Shared helpers for orchestration tests.

use std::time::Duration;

use mockfetch::{
    FetchConfiguration, FixtureStore, Profile, SeededRandomProvider, SimProviders,
    SimulatedFetcher,
};

pub type SeededFetcher = SimulatedFetcher<SimProviders<SeededRandomProvider>>;

/// Fetcher over the reference fixtures with the given configuration.
pub fn fetcher(config: FetchConfiguration) -> SeededFetcher {
    SimulatedFetcher::new(FixtureStore::reference(), config, SimProviders::seeded(42))
        .expect("valid configuration")
}

/// Fetcher with reference latencies and no injected faults.
pub fn reliable_fetcher() -> SeededFetcher {
    fetcher(FetchConfiguration::reliable())
}

/// Reference fixtures plus a user (id 3) who has never posted.
pub fn store_with_silent_user() -> FixtureStore {
    FixtureStore::reference().with_profile(Profile {
        id: 3,
        name: "Quiet".into(),
    })
}

/// Assert a duration is `expected`, allowing a few milliseconds of timer
/// rounding on the paused clock.
pub fn assert_near(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual <= expected + Duration::from_millis(10),
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
