//! Tagged results for the always-produce-output policy.
//!
//! The pipeline never aborts mid-flow by default: fetch and completion
//! failures are converted into descriptive placeholder strings and the
//! downstream stages proceed. `Outcome` keeps that path visible to
//! callers instead of folding it into an ordinary success.

use serde::Deserialize;

/// How a pipeline stage reacts to an error from one of its services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Convert the error into a placeholder value and continue.
    #[default]
    Degrade,
    /// Surface the error to the caller.
    Propagate,
}

/// Result of a pipeline stage that may have degraded instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The stage ran normally.
    Produced(T),
    /// A service error was converted into a placeholder value.
    Degraded(T),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Produced(value) | Outcome::Degraded(value) => value,
        }
    }

    pub fn as_inner(&self) -> &T {
        match self {
            Outcome::Produced(value) | Outcome::Degraded(value) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let produced = Outcome::Produced("context".to_string());
        assert!(!produced.is_degraded());
        assert_eq!(produced.as_inner(), "context");
        assert_eq!(produced.into_inner(), "context");

        let degraded = Outcome::Degraded("Error fetching subreddit: boom".to_string());
        assert!(degraded.is_degraded());
        assert!(degraded.into_inner().starts_with("Error fetching"));
    }

    #[test]
    fn test_policy_parses_from_config_values() {
        #[derive(Deserialize)]
        struct Wrapper {
            on_error: ErrorPolicy,
        }

        let degrade: Wrapper = toml::from_str(r#"on_error = "degrade""#).unwrap();
        assert_eq!(degrade.on_error, ErrorPolicy::Degrade);

        let propagate: Wrapper = toml::from_str(r#"on_error = "propagate""#).unwrap();
        assert_eq!(propagate.on_error, ErrorPolicy::Propagate);
    }
}
