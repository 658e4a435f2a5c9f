pub mod api;
pub mod auth;


pub use api::RedditClient;

use simulator_core::{Comment, CoreError, Post, Submission};

/// Read-side Reddit operations the synthesis pipeline consumes.
///
/// Implemented by [`RedditClient`] against the live API; tests substitute
/// in-memory sources.
pub trait ContentSource {
    async fn fetch_hot_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>, CoreError>;

    /// Top-level comments for a post, in listing order. Collapsed
    /// "more comments" placeholders are skipped, never expanded.
    async fn fetch_comments(&self, post: &Post) -> Result<Vec<Comment>, CoreError>;

    async fn fetch_user_comments(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, CoreError>;

    async fn fetch_user_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, CoreError>;
}

impl<S: ContentSource> ContentSource for &S {
    async fn fetch_hot_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>, CoreError> {
        (**self).fetch_hot_posts(subreddit, limit).await
    }

    async fn fetch_comments(&self, post: &Post) -> Result<Vec<Comment>, CoreError> {
        (**self).fetch_comments(post).await
    }

    async fn fetch_user_comments(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, CoreError> {
        (**self).fetch_user_comments(username, limit).await
    }

    async fn fetch_user_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, CoreError> {
        (**self).fetch_user_submissions(username, limit).await
    }
}
