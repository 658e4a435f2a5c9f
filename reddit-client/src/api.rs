use crate::auth::{self, AuthGrant, RedditToken};
use crate::ContentSource;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use simulator_core::{Comment, CoreError, Post, RedditApiError, RedditConfig, Submission};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: String,
    pub subreddit: String,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub stickied: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditCommentData {
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    pub subreddit: String,
}

impl From<RedditPostData> for Post {
    fn from(data: RedditPostData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            selftext: if data.is_self && !data.selftext.is_empty() {
                Some(data.selftext)
            } else {
                None
            },
            author: data.author,
            subreddit: data.subreddit,
            num_comments: data.num_comments,
        }
    }
}

impl From<RedditPostData> for Submission {
    fn from(data: RedditPostData) -> Self {
        Self {
            title: data.title,
            selftext: if data.is_self && !data.selftext.is_empty() {
                Some(data.selftext)
            } else {
                None
            },
            subreddit: data.subreddit,
        }
    }
}

impl From<RedditCommentData> for Comment {
    fn from(data: RedditCommentData) -> Self {
        Self {
            body: data.body,
            author: data.author,
            subreddit: data.subreddit,
        }
    }
}

/// Reddit Data API client using script-type OAuth grants.
///
/// Read paths run on an application-only token; `submit_post` upgrades to
/// the password grant when credentials are configured. Tokens are cached
/// with their expiry and refreshed transparently.
#[derive(Debug)]
pub struct RedditClient {
    http: Client,
    config: RedditConfig,
    app_token: Mutex<Option<RedditToken>>,
    user_token: Mutex<Option<RedditToken>>,
}

impl RedditClient {
    pub fn new(config: RedditConfig) -> Result<Self, CoreError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            config,
            app_token: Mutex::new(None),
            user_token: Mutex::new(None),
        })
    }

    async fn app_access_token(&self) -> Result<String, CoreError> {
        let mut guard = self.app_token.lock().await;
        if let Some(token) = guard.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
            debug!("App token expired, refreshing");
        }

        let token = auth::request_token(
            &self.http,
            &self.config.client_id,
            &self.config.client_secret,
            &AuthGrant::ClientCredentials,
        )
        .await?;
        let access = token.access_token.clone();
        *guard = Some(token);
        Ok(access)
    }

    async fn user_access_token(&self) -> Result<String, CoreError> {
        let (username, password) = match (&self.config.username, &self.config.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u.clone(), p.clone()),
            _ => {
                return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                    reason: "submitting requires reddit.username and reddit.password".to_string(),
                }))
            }
        };

        let mut guard = self.user_token.lock().await;
        if let Some(token) = guard.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
            debug!("User token expired, refreshing");
        }

        let token = auth::request_token(
            &self.http,
            &self.config.client_id,
            &self.config.client_secret,
            &AuthGrant::Password { username, password },
        )
        .await?;
        let access = token.access_token.clone();
        *guard = Some(token);
        Ok(access)
    }

    /// GET an API endpoint on the app token. 404 passes through so callers
    /// can map it to the specific missing resource.
    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response, CoreError> {
        let token = self.app_access_token().await?;
        let url = format!("{REDDIT_API_BASE}{endpoint}");

        debug!("Making Reddit API request: GET {}", endpoint);
        let mut request = self.http.get(&url).bearer_auth(&token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            error!("Network error for GET {}: {}", endpoint, e);
            if e.is_timeout() {
                CoreError::RedditApi(RedditApiError::RequestTimeout)
            } else {
                CoreError::Network(e)
            }
        })?;

        check_status(response, endpoint)
    }

    pub async fn fetch_hot_posts(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<Post>, CoreError> {
        let endpoint = format!("/r/{subreddit}/hot");
        let limit_str = limit.to_string();
        let response = self.get(&endpoint, &[("limit", limit_str.as_str())]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::RedditApi(RedditApiError::SubredditNotFound {
                subreddit: subreddit.to_string(),
            }));
        }

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{subreddit}"),
            })
        })?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();

        info!("Retrieved {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

    pub async fn fetch_comments(&self, post: &Post) -> Result<Vec<Comment>, CoreError> {
        let endpoint = format!("/r/{}/comments/{}", post.subreddit, post.id);
        let response = self
            .get(&endpoint, &[("depth", "1"), ("limit", "25")])
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Post not found: {}", post.id),
            }));
        }

        // The endpoint returns a two-element array: the post listing
        // followed by the comment listing.
        let listings: Vec<RedditListing<Value>> = response.json().await.map_err(|e| {
            error!("Failed to parse comments: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse comments for post {}", post.id),
            })
        })?;

        let comment_listing = listings.into_iter().nth(1).ok_or_else(|| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Comment listing missing for post {}", post.id),
            })
        })?;

        let comments = top_level_comments(comment_listing)?;
        debug!(
            "Retrieved {} top-level comments for post {}",
            comments.len(),
            post.id
        );
        Ok(comments)
    }

    pub async fn fetch_user_comments(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, CoreError> {
        let endpoint = format!("/user/{username}/comments");
        let limit_str = limit.to_string();
        let response = self.get(&endpoint, &[("limit", limit_str.as_str())]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::RedditApi(RedditApiError::UserNotFound {
                username: username.to_string(),
            }));
        }

        let listing: RedditListing<RedditCommentData> = response.json().await.map_err(|e| {
            error!("Failed to parse user comments: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse comments for u/{username}"),
            })
        })?;

        let comments: Vec<Comment> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();

        info!("Retrieved {} comments from u/{}", comments.len(), username);
        Ok(comments)
    }

    pub async fn fetch_user_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, CoreError> {
        let endpoint = format!("/user/{username}/submitted");
        let limit_str = limit.to_string();
        let response = self.get(&endpoint, &[("limit", limit_str.as_str())]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::RedditApi(RedditApiError::UserNotFound {
                username: username.to_string(),
            }));
        }

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse user submissions: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse submissions for u/{username}"),
            })
        })?;

        let submissions: Vec<Submission> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();

        info!(
            "Retrieved {} submissions from u/{}",
            submissions.len(),
            username
        );
        Ok(submissions)
    }

    /// Create a self-post. Requires username/password in the config.
    pub async fn submit_post(
        &self,
        subreddit: &str,
        title: &str,
        body: &str,
    ) -> Result<String, CoreError> {
        let token = self.user_access_token().await?;
        let url = format!("{REDDIT_API_BASE}/api/submit");

        info!("Submitting self-post to r/{}", subreddit);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .form(&[
                ("sr", subreddit),
                ("kind", "self"),
                ("title", title),
                ("text", body),
                ("api_type", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Network error for POST /api/submit: {}", e);
                if e.is_timeout() {
                    CoreError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                }
            })?;

        let response = check_status(response, "/api/submit")?;
        let submit: SubmitResponse = response.json().await.map_err(|e| {
            error!("Failed to parse submit response: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: "Failed to parse submit response".to_string(),
            })
        })?;

        submit.into_url()
    }
}

impl ContentSource for RedditClient {
    async fn fetch_hot_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>, CoreError> {
        RedditClient::fetch_hot_posts(self, subreddit, limit).await
    }

    async fn fetch_comments(&self, post: &Post) -> Result<Vec<Comment>, CoreError> {
        RedditClient::fetch_comments(self, post).await
    }

    async fn fetch_user_comments(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, CoreError> {
        RedditClient::fetch_user_comments(self, username, limit).await
    }

    async fn fetch_user_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, CoreError> {
        RedditClient::fetch_user_submissions(self, username, limit).await
    }
}

/// Extract `t1` children from a comment listing. `more` children are the
/// collapsed placeholders and are skipped without further fetching.
pub(crate) fn top_level_comments(
    listing: RedditListing<Value>,
) -> Result<Vec<Comment>, CoreError> {
    let mut comments = Vec::new();
    for child in listing.data.children {
        if child.kind != "t1" {
            continue;
        }
        let data: RedditCommentData = serde_json::from_value(child.data)?;
        comments.push(data.into());
    }
    Ok(comments)
}

fn check_status(response: Response, endpoint: &str) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() || status == StatusCode::NOT_FOUND {
        return Ok(response);
    }

    error!("Request failed with status {} for {}", status, endpoint);
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("Rate limited, retry after {} seconds", retry_after);
            Err(CoreError::RedditApi(RedditApiError::RateLimitExceeded {
                retry_after,
            }))
        }
        StatusCode::UNAUTHORIZED => Err(CoreError::RedditApi(RedditApiError::InvalidToken)),
        StatusCode::FORBIDDEN => Err(CoreError::RedditApi(RedditApiError::Forbidden {
            resource: endpoint.to_string(),
        })),
        status if status.is_server_error() => {
            Err(CoreError::RedditApi(RedditApiError::ServerError {
                status_code: status.as_u16(),
            }))
        }
        status => Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
            details: format!("Unexpected status {status} for {endpoint}"),
        })),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    json: SubmitJson,
}

#[derive(Debug, Deserialize)]
struct SubmitJson {
    #[serde(default)]
    errors: Vec<Vec<Value>>,
    #[serde(default)]
    data: Option<SubmitData>,
}

#[derive(Debug, Deserialize)]
struct SubmitData {
    #[serde(default)]
    url: Option<String>,
}

impl SubmitResponse {
    pub(crate) fn into_url(self) -> Result<String, CoreError> {
        if let Some(first) = self.json.errors.first() {
            let details = first
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(": ");
            return Err(CoreError::RedditApi(RedditApiError::SubmissionRejected {
                details,
            }));
        }
        Ok(self
            .json
            .data
            .and_then(|data| data.url)
            .unwrap_or_else(|| "(submitted)".to_string()))
    }
}
