use std::fmt;

/// What a simulation run is aimed at: a whole subreddit or a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Subreddit(String),
    User(String),
}

impl Target {
    /// Parse a free-text token into a target.
    ///
    /// A leading `u/` selects a user; otherwise a leading `r/` prefix is
    /// stripped (once) and the remainder names a subreddit. Empty input,
    /// or an empty name after stripping, falls back to `default_subreddit`.
    pub fn parse(raw: &str, default_subreddit: &str) -> Self {
        let token = raw.trim();

        if let Some(username) = token.strip_prefix("u/") {
            if !username.is_empty() {
                return Target::User(username.to_string());
            }
            return Target::Subreddit(default_subreddit.to_string());
        }

        let name = token.strip_prefix("r/").unwrap_or(token);
        if name.is_empty() {
            Target::Subreddit(default_subreddit.to_string())
        } else {
            Target::Subreddit(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Subreddit(name) | Target::User(name) => name,
        }
    }

    pub fn type_label(&self) -> &'static str {
        match self {
            Target::Subreddit(_) => "subreddit",
            Target::User(_) => "user",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Subreddit(name) => write!(f, "r/{name}"),
            Target::User(name) => write!(f, "u/{name}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub selftext: Option<String>,
    pub author: String,
    pub subreddit: String,
    pub num_comments: u32,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub body: String,
    pub author: String,
    pub subreddit: String,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub title: String,
    pub selftext: Option<String>,
    pub subreddit: String,
}

/// A parsed title/body pair produced by the structured synthesis mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub title: String,
    pub body: String,
}
