use mockfetch::{
    fetch_parallel, fetch_sequential, FetchConfiguration, FetchError, FetchState, Operation,
    Providers, TimeProvider,
};

use super::support::{assert_near, fetcher, ms, reliable_fetcher};

#[tokio::test(start_paused = true)]
async fn test_parallel_overlaps_profile_and_posts() {
    let fetcher = reliable_fetcher();
    let report = fetch_parallel(&fetcher, fetcher.providers().time(), 2).await;

    assert!(report.is_success());

    // Profile and posts are both in flight from the start
    assert_eq!(report.entered_at(FetchState::FetchingProfile), Some(ms(0)));
    assert_eq!(report.entered_at(FetchState::FetchingPosts), Some(ms(0)));

    let joined = report
        .entered_at(FetchState::FetchingComments)
        .expect("comments stage");
    assert_near(joined, ms(1500));
    assert!(joined < ms(2500), "profile and posts were serialized");

    assert_near(report.elapsed, ms(3500));
}

#[tokio::test(start_paused = true)]
async fn test_parallel_is_faster_than_sequential() {
    let fetcher = reliable_fetcher();
    let time = fetcher.providers().time();

    let sequential = fetch_sequential(&fetcher, time, 1).await;
    let parallel = fetch_parallel(&fetcher, time, 1).await;

    assert_eq!(sequential.outcome, parallel.outcome);
    assert!(parallel.elapsed < sequential.elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_logs_bill_data() {
    let fetcher = reliable_fetcher();
    let report = fetch_parallel(&fetcher, fetcher.providers().time(), 2).await;

    assert_eq!(
        report.to_string(),
        [
            "Parallel Fetch:",
            r#"User profile: {"id":2,"name":"Bill"}"#,
            r#"Posts: [{"id":102,"content":"Why don't bachelors like Git?"}]"#,
            r#"Comments: [{"id":202,"text":"Because they're scared to commit!"}]"#,
            "All data retrieved successfully",
        ]
        .join("\n")
    );
}

#[tokio::test(start_paused = true)]
async fn test_parallel_posts_failure_stops_before_comments() {
    let mut config = FetchConfiguration::reliable();
    config.posts.failure_probability = 1.0;
    let fetcher = fetcher(config);

    let report = fetch_parallel(&fetcher, fetcher.providers().time(), 1).await;

    assert_eq!(report.error(), Some(&FetchError::PostsFetch));
    assert_eq!(report.final_state(), FetchState::Failed);
    assert_eq!(report.entered_at(FetchState::FetchingComments), None);
    assert_eq!(report.lines, vec!["Error: Failed to fetch posts".to_string()]);

    let stats = fetcher.stats();
    assert_eq!(stats.get(Operation::Profile).lookups, 1);
    assert_eq!(stats.get(Operation::Posts).injected_failures, 1);
    assert_eq!(stats.get(Operation::Comments).attempts, 0);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_first_observed_failure_wins() {
    // Profile resolves first with the reference latencies
    let both_fail = FetchConfiguration::reliable().with_failure_probability(1.0);
    let fetcher_a = fetcher(both_fail.clone());
    let report = fetch_parallel(&fetcher_a, fetcher_a.providers().time(), 1).await;
    assert_eq!(report.error(), Some(&FetchError::ProfileFetch));
    assert_near(report.elapsed, ms(1000));

    // Make posts the faster one and its failure is reported instead
    let mut posts_first = both_fail;
    posts_first.profile.latency = ms(1500);
    posts_first.posts.latency = ms(500);
    let fetcher_b = fetcher(posts_first);
    let time = fetcher_b.providers().time();
    let started = time.now();
    let report = fetch_parallel(&fetcher_b, time, 1).await;
    assert_eq!(report.error(), Some(&FetchError::PostsFetch));
    assert_near(time.now() - started, ms(500));
}
