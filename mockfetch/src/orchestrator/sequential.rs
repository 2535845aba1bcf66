//! Sequential strategy: each fetch is awaited inline before the next starts.

use crate::error::FetchResult;
use crate::fetch::Fetcher;
use crate::fixtures::UserId;
use crate::providers::TimeProvider;

use super::report::{FetchReport, FetchedData, RunRecorder, Strategy};
use super::state::FetchState;

/// Fetch profile, then posts, then comments of the first post.
///
/// The first failing stage stops the run; later stages are never called.
pub async fn fetch_sequential<F, T>(fetcher: &F, time: &T, user_id: UserId) -> FetchReport
where
    F: Fetcher + ?Sized,
    T: TimeProvider,
{
    let mut recorder = RunRecorder::start(Strategy::Sequential, user_id, time);
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
    recorder.enter(FetchState::FetchingProfile);
    let profile = fetcher.fetch_profile(user_id).await?;
    recorder.record("User profile", &profile);

    recorder.enter(FetchState::FetchingPosts);
    let posts = fetcher.fetch_posts(user_id).await?;
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
