//! Several orchestrations in flight on the same task at once.

use std::rc::Rc;

use mockfetch::{
    run_strategy, FetchConfiguration, FetchError, FixtureStore, Operation, Providers,
    SimProviders, SimulatedFetcher, Strategy,
};

use super::support::{assert_near, ms, reliable_fetcher, SeededFetcher};

fn shared_fetcher(
    store: &Rc<FixtureStore>,
    config: FetchConfiguration,
    seed: u64,
) -> SeededFetcher {
    SimulatedFetcher::with_shared_store(Rc::clone(store), config, SimProviders::seeded(seed))
        .expect("valid configuration")
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_runs_do_not_interfere() {
    let store = Rc::new(FixtureStore::reference());
    let sequential = shared_fetcher(&store, FetchConfiguration::reliable(), 1);
    let parallel = shared_fetcher(&store, FetchConfiguration::reliable(), 2);
    let mut failing_posts = FetchConfiguration::reliable();
    failing_posts.posts.failure_probability = 1.0;
    let chained = shared_fetcher(&store, failing_posts, 3);

    let (sequential_report, chained_report, parallel_report) = tokio::join!(
        run_strategy(Strategy::Sequential, &sequential, sequential.providers().time(), 1),
        run_strategy(Strategy::Chained, &chained, chained.providers().time(), 2),
        run_strategy(Strategy::Parallel, &parallel, parallel.providers().time(), 2),
    );

    // Same timings as runs made alone
    assert!(sequential_report.is_success());
    assert_near(sequential_report.elapsed, ms(4500));
    assert!(parallel_report.is_success());
    assert_near(parallel_report.elapsed, ms(3500));

    // The forced failure stays with its own run
    assert_eq!(chained_report.error(), Some(&FetchError::PostsFetch));
    assert_near(chained_report.elapsed, ms(2500));
    assert_eq!(
        chained_report.lines.last().map(String::as_str),
        Some("Error: Failed to fetch posts")
    );

    // Each fetcher only counted its own calls
    assert_eq!(sequential.stats().total_attempts(), 3);
    assert_eq!(parallel.stats().total_attempts(), 3);
    assert_eq!(chained.stats().total_attempts(), 2);
    assert_eq!(chained.stats().get(Operation::Comments).attempts, 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_runs_return_same_data_as_alone() {
    let alone = reliable_fetcher();
    let time = alone.providers().time();
    let expected_navi = run_strategy(Strategy::Sequential, &alone, time, 1).await;
    let expected_bill = run_strategy(Strategy::Sequential, &alone, time, 2).await;

    let store = Rc::new(FixtureStore::reference());
    let first = shared_fetcher(&store, FetchConfiguration::reliable(), 4);
    let second = shared_fetcher(&store, FetchConfiguration::reliable(), 5);

    let (navi, bill) = tokio::join!(
        run_strategy(Strategy::Parallel, &first, first.providers().time(), 1),
        run_strategy(Strategy::Chained, &second, second.providers().time(), 2),
    );

    assert_eq!(navi.data(), expected_navi.data());
    assert_eq!(bill.data(), expected_bill.data());
    assert_ne!(navi.data(), bill.data());
}
