//! Chained strategy: every stage is a continuation of the previous one.
//!
//! Control flow matches [`fetch_sequential`](super::fetch_sequential), but
//! the pipeline is assembled with [`TryFutureExt`] combinators before it is
//! awaited once. A single error handler at the end of the chain covers every
//! stage; once a stage fails, no later continuation runs.

use futures::TryFutureExt;
use std::cell::RefCell;

use crate::fetch::Fetcher;
use crate::fixtures::UserId;
use crate::providers::TimeProvider;

use super::report::{FetchReport, FetchedData, RunRecorder, Strategy};
use super::state::FetchState;

/// Fetch profile, posts and comments as one continuation pipeline.
pub async fn fetch_chained<F, T>(fetcher: &F, time: &T, user_id: UserId) -> FetchReport
where
    F: Fetcher + ?Sized,
    T: TimeProvider,
{
    let recorder = RefCell::new(RunRecorder::start(Strategy::Chained, user_id, time));
    recorder.borrow_mut().enter(FetchState::FetchingProfile);

    let outcome = fetcher
        .fetch_profile(user_id)
        .and_then(|profile| {
            let mut log = recorder.borrow_mut();
            log.record("User profile", &profile);
            log.enter(FetchState::FetchingPosts);
            fetcher
                .fetch_posts(user_id)
                .map_ok(move |posts| (profile, posts))
        })
        .and_then(|(profile, posts)| {
            let mut log = recorder.borrow_mut();
            log.record("Posts", &posts);
            log.enter(FetchState::FetchingComments);
            let first_post = posts.first().map(|post| post.id);
            fetcher
                .fetch_comments(first_post)
                .map_ok(move |comments| FetchedData {
                    profile,
                    posts,
                    comments,
                })
        })
        .inspect_ok(|data| recorder.borrow_mut().record("Comments", &data.comments))
        .inspect_err(|error| tracing::debug!(%error, "chained fetch rejected"))
        .await;

    recorder.into_inner().finish(outcome)
}
