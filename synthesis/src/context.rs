use reddit_client::ContentSource;
use simulator_core::{
    char_len, truncate_chars, Comment, CoreError, ErrorPolicy, Outcome, Post, Submission, Target,
};
use tracing::{debug, info, warn};

/// Hot posts fetched in subreddit mode.
pub const DEFAULT_POST_LIMIT: u32 = 25;
/// Recent comments fetched in user mode.
pub const DEFAULT_COMMENT_LIMIT: u32 = 30;
/// User submissions are always capped here.
pub const SUBMISSION_LIMIT: u32 = 10;
/// Rendered items kept in a subreddit context, independent of the fetch limit.
pub const MAX_SUBREDDIT_ITEMS: usize = 15;
/// Rendered items kept in a user context.
pub const MAX_USER_ITEMS: usize = 20;

// Strict "under" thresholds: at the limit the text is dropped, not truncated.
const POST_BODY_LIMIT: usize = 500;
const TOP_COMMENT_LIMIT: usize = 300;

const USER_COMMENT_TRUNCATE: usize = 300;
const USER_SELFTEXT_TRUNCATE: usize = 200;

const POST_SEPARATOR: &str = "\n\n---\n\n";
const ITEM_SEPARATOR: &str = "\n\n";

/// Turns a target into a bounded context string summarizing recent
/// activity, in the source's delivery order.
pub struct ContextFetcher<S> {
    source: S,
    policy: ErrorPolicy,
    post_limit: u32,
    comment_limit: u32,
}

impl<S: ContentSource> ContextFetcher<S> {
    pub fn new(source: S, policy: ErrorPolicy) -> Self {
        Self {
            source,
            policy,
            post_limit: DEFAULT_POST_LIMIT,
            comment_limit: DEFAULT_COMMENT_LIMIT,
        }
    }

    pub fn with_post_limit(mut self, limit: u32) -> Self {
        self.post_limit = limit;
        self
    }

    pub fn with_comment_limit(mut self, limit: u32) -> Self {
        self.comment_limit = limit;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and render a context for `target`.
    ///
    /// Under the degrade policy any fetch error becomes an
    /// `Error fetching ...` placeholder context so the pipeline can
    /// continue into synthesis.
    pub async fn fetch_context(&self, target: &Target) -> Result<Outcome<String>, CoreError> {
        let (result, prefix) = match target {
            Target::Subreddit(name) => (
                self.subreddit_context(name).await,
                "Error fetching subreddit",
            ),
            Target::User(name) => (self.user_context(name).await, "Error fetching user"),
        };

        match result {
            Ok(context) => Ok(Outcome::Produced(context)),
            Err(e) => match self.policy {
                ErrorPolicy::Degrade => {
                    warn!("Context fetch for {} degraded: {}", target, e);
                    Ok(Outcome::Degraded(format!("{prefix}: {e}")))
                }
                ErrorPolicy::Propagate => Err(e),
            },
        }
    }

    async fn subreddit_context(&self, subreddit: &str) -> Result<String, CoreError> {
        let posts = self
            .source
            .fetch_hot_posts(subreddit, self.post_limit)
            .await?;
        debug!("Rendering {} posts from r/{}", posts.len(), subreddit);

        let mut rendered = Vec::new();
        for post in posts.iter().take(self.post_limit as usize) {
            let comments = self.source.fetch_comments(post).await?;
            rendered.push(render_post(post, &comments));
        }

        rendered.truncate(MAX_SUBREDDIT_ITEMS);
        info!(
            "Built context for r/{} with {} items",
            subreddit,
            rendered.len()
        );
        Ok(rendered.join(POST_SEPARATOR))
    }

    async fn user_context(&self, username: &str) -> Result<String, CoreError> {
        let comments = self
            .source
            .fetch_user_comments(username, self.comment_limit)
            .await?;
        let submissions = self
            .source
            .fetch_user_submissions(username, SUBMISSION_LIMIT)
            .await?;

        // Re-apply the limits here so a misbehaving source cannot exceed
        // the documented bounds.
        let mut rendered: Vec<String> = comments
            .iter()
            .take(self.comment_limit as usize)
            .map(render_user_comment)
            .collect();
        rendered.extend(
            submissions
                .iter()
                .take(SUBMISSION_LIMIT as usize)
                .map(render_user_submission),
        );

        rendered.truncate(MAX_USER_ITEMS);
        info!(
            "Built context for u/{} with {} items",
            username,
            rendered.len()
        );
        Ok(rendered.join(ITEM_SEPARATOR))
    }
}

fn render_post(post: &Post, comments: &[Comment]) -> String {
    let mut text = format!("Title: {}", post.title);

    if let Some(body) = &post.selftext {
        if char_len(body) < POST_BODY_LIMIT {
            text.push_str("\nBody: ");
            text.push_str(body);
        }
    }

    let top: Vec<&str> = comments
        .iter()
        .take(3)
        .filter(|comment| char_len(&comment.body) < TOP_COMMENT_LIMIT)
        .take(2)
        .map(|comment| comment.body.as_str())
        .collect();
    if !top.is_empty() {
        text.push_str("\nTop comments: ");
        text.push_str(&top.join(" | "));
    }

    text
}

fn render_user_comment(comment: &Comment) -> String {
    format!(
        "[r/{}] {}",
        comment.subreddit,
        truncate_chars(&comment.body, USER_COMMENT_TRUNCATE)
    )
}

fn render_user_submission(submission: &Submission) -> String {
    let mut text = format!("[r/{}] Title: {}", submission.subreddit, submission.title);
    if let Some(selftext) = &submission.selftext {
        if !selftext.is_empty() {
            text.push_str(" - ");
            text.push_str(truncate_chars(selftext, USER_SELFTEXT_TRUNCATE));
        }
    }
    text
}
