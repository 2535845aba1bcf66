use mockfetch::{
    fetch_sequential, FetchConfiguration, FetchState, Operation, Providers, SimProviders,
    SimulatedFetcher, SUCCESS_LINE,
};

use super::support::{assert_near, ms, reliable_fetcher, store_with_silent_user};

#[tokio::test(start_paused = true)]
async fn test_sequential_logs_reference_data_for_user_1() {
    let fetcher = reliable_fetcher();
    let report = fetch_sequential(&fetcher, fetcher.providers().time(), 1).await;

    assert!(report.is_success());
    assert_eq!(
        report.lines,
        vec![
            r#"User profile: {"id":1,"name":"Navi"}"#.to_string(),
            r#"Posts: [{"id":101,"content":"My favorite joke is, !false"}]"#.to_string(),
            r#"Comments: [{"id":201,"text":"It's funny because it's true haha"}]"#.to_string(),
            SUCCESS_LINE.to_string(),
        ]
    );

    let data = report.data().expect("successful run has data");
    assert_eq!(data.profile.name, "Navi");
    assert_eq!(data.posts[0].id, 101);
    assert_eq!(data.comments[0].id, 201);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_latencies_add_up() {
    let fetcher = reliable_fetcher();
    let report = fetch_sequential(&fetcher, fetcher.providers().time(), 2).await;

    assert_eq!(report.entered_at(FetchState::FetchingProfile), Some(ms(0)));
    assert_near(
        report.entered_at(FetchState::FetchingPosts).expect("posts stage"),
        ms(1000),
    );
    assert_near(
        report
            .entered_at(FetchState::FetchingComments)
            .expect("comments stage"),
        ms(2500),
    );
    assert_near(report.elapsed, ms(4500));
}

#[tokio::test(start_paused = true)]
async fn test_sequential_state_history() {
    let fetcher = reliable_fetcher();
    let report = fetch_sequential(&fetcher, fetcher.providers().time(), 1).await;

    assert_eq!(
        report.states(),
        vec![
            FetchState::Idle,
            FetchState::FetchingProfile,
            FetchState::FetchingPosts,
            FetchState::FetchingComments,
            FetchState::Done,
        ]
    );
    assert_eq!(report.final_state(), FetchState::Done);
}

#[tokio::test(start_paused = true)]
async fn test_user_without_posts_still_fetches_comments() {
    let fetcher = SimulatedFetcher::new(
        store_with_silent_user(),
        FetchConfiguration::fast_local(),
        SimProviders::seeded(5),
    )
    .expect("valid configuration");
    let report = fetch_sequential(&fetcher, fetcher.providers().time(), 3).await;

    assert!(report.is_success());
    let data = report.data().expect("data");
    assert!(data.posts.is_empty());
    assert!(data.comments.is_empty());
    assert_eq!(fetcher.stats().get(Operation::Comments).lookups, 1);
    assert!(report.lines.contains(&"Posts: []".to_string()));
    assert!(report.lines.contains(&"Comments: []".to_string()));
}
