//! Parallel strategy: profile and posts are in flight at the same time.

use crate::error::FetchResult;
use crate::fetch::Fetcher;
use crate::fixtures::UserId;
use crate::providers::TimeProvider;

use super::report::{FetchReport, FetchedData, RunRecorder, Strategy};
use super::state::FetchState;

/// Fetch profile and posts concurrently, then comments of the first post.
///
/// Both fetches are polled on the calling task, so their latencies overlap.
/// If either fails, the first failure observed ends the join and the other
/// fetch is dropped. Comments depend on the posts result and start only
/// after the join.
pub async fn fetch_parallel<F, T>(fetcher: &F, time: &T, user_id: UserId) -> FetchReport
where
    F: Fetcher + ?Sized,
    T: TimeProvider,
{
    let mut recorder = RunRecorder::start(Strategy::Parallel, user_id, time);
    let outcome = run(fetcher, &mut recorder, user_id).await;
    recorder.finish(outcome)
}

async fn run<F, T>(
    fetcher: &F,
    recorder: &mut RunRecorder<'_, T>,
    user_id: UserId,
) -> FetchResult<FetchedData>
where
    F: Fetcher + ?Sized,
    T: TimeProvider,
{
    // Both stages are entered before either completes
    recorder.enter(FetchState::FetchingProfile);
    recorder.enter(FetchState::FetchingPosts);
    let (profile, posts) = tokio::try_join!(
        fetcher.fetch_profile(user_id),
        fetcher.fetch_posts(user_id)
    )?;
    recorder.record("User profile", &profile);
    recorder.record("Posts", &posts);

    recorder.enter(FetchState::FetchingComments);
    let first_post = posts.first().map(|post| post.id);
    let comments = fetcher.fetch_comments(first_post).await?;
    recorder.record("Comments", &comments);

    Ok(FetchedData {
        profile,
        posts,
        comments,
    })
}
