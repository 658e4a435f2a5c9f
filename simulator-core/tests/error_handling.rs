use simulator_core::{CompletionError, ConfigError, CoreError, RedditApiError};

#[test]
fn test_reddit_error_display() {
    let error = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "DoesNotExist".to_string(),
    });
    assert_eq!(
        error.to_string(),
        "Reddit API error: Subreddit not found: DoesNotExist"
    );

    let error = CoreError::RedditApi(RedditApiError::RateLimitExceeded { retry_after: 60 });
    assert!(error.to_string().contains("Retry after 60 seconds"));
}

#[test]
fn test_completion_error_display() {
    let error = CoreError::Completion(CompletionError::InvalidApiKey {
        provider: "groq".to_string(),
    });
    assert_eq!(
        error.to_string(),
        "Completion error: API key invalid or missing for groq"
    );

    let error = CoreError::Completion(CompletionError::EmptyResponse);
    assert!(error.to_string().contains("no completion choices"));
}

#[test]
fn test_config_error_display() {
    let error = CoreError::Config(ConfigError::MissingField {
        field: "completion.api_key".to_string(),
    });
    assert!(error.to_string().contains("completion.api_key"));
}

#[test]
fn test_sub_errors_convert_to_core_error() {
    fn fails_fetch() -> Result<(), CoreError> {
        Err(RedditApiError::InvalidToken)?
    }
    fn fails_generate() -> Result<(), CoreError> {
        Err(CompletionError::ServiceUnavailable {
            provider: "groq".to_string(),
        })?
    }

    assert!(matches!(
        fails_fetch(),
        Err(CoreError::RedditApi(RedditApiError::InvalidToken))
    ));
    assert!(matches!(
        fails_generate(),
        Err(CoreError::Completion(CompletionError::ServiceUnavailable { .. }))
    ));
}

#[test]
fn test_toml_parse_error_converts() {
    let result: Result<simulator_core::AppConfig, _> = toml::from_str("not [ valid");
    let config_error: ConfigError = result.unwrap_err().into();
    assert!(matches!(config_error, ConfigError::Parse(_)));
}
