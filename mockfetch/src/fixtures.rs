//! Read-only fixture tables backing the simulated fetches.

use serde::Serialize;
use std::collections::HashMap;

/// Identifier of a user profile.
pub type UserId = u64;

/// Identifier of a post.
pub type PostId = u64;

/// Identifier of a comment.
pub type CommentId = u64;

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Profile id, equal to the owning user id.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// A post owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post id.
    pub id: PostId,
    /// Post body.
    pub content: String,
}

/// A comment attached to a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Comment id.
    pub id: CommentId,
    /// Comment body.
    pub text: String,
}

/// In-memory lookup tables for profiles, posts and comments.
///
/// Lookups are pure and never fail: a missing profile is `None`, missing
/// posts or comments are an empty slice. The store is built up front and
/// then only read, so it is usually shared behind an `Rc`.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    profiles: HashMap<UserId, Profile>,
    posts: HashMap<UserId, Vec<Post>>,
    comments: HashMap<PostId, Vec<Comment>>,
}

impl FixtureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The two-user data set the demo runs against.
    pub fn reference() -> Self {
        Self::new()
            .with_profile(Profile {
                id: 1,
                name: "Navi".into(),
            })
            .with_profile(Profile {
                id: 2,
                name: "Bill".into(),
            })
            .with_post(
                1,
                Post {
                    id: 101,
                    content: "My favorite joke is, !false".into(),
                },
            )
            .with_post(
                2,
                Post {
                    id: 102,
                    content: "Why don't bachelors like Git?".into(),
                },
            )
            .with_comment(
                101,
                Comment {
                    id: 201,
                    text: "It's funny because it's true haha".into(),
                },
            )
            .with_comment(
                102,
                Comment {
                    id: 202,
                    text: "Because they're scared to commit!".into(),
                },
            )
    }

    /// Add or replace a profile, keyed by its id.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.insert(profile.id, profile);
        self
    }

    /// Append a post to a user's post list.
    pub fn with_post(mut self, user_id: UserId, post: Post) -> Self {
        self.posts.entry(user_id).or_default().push(post);
        self
    }

    /// Append a comment to a post's comment list.
    pub fn with_comment(mut self, post_id: PostId, comment: Comment) -> Self {
        self.comments.entry(post_id).or_default().push(comment);
        self
    }

    /// Look up a profile by user id.
    pub fn profile(&self, user_id: UserId) -> Option<&Profile> {
        self.profiles.get(&user_id)
    }

    /// Posts written by `user_id`, in insertion order.
    pub fn posts(&self, user_id: UserId) -> &[Post] {
        self.posts.get(&user_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Comments on `post_id`, in insertion order.
    ///
    /// `None` is the absent-post sentinel used when a user has no posts; it
    /// always resolves to an empty slice.
    pub fn comments(&self, post_id: Option<PostId>) -> &[Comment] {
        post_id
            .and_then(|id| self.comments.get(&id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
