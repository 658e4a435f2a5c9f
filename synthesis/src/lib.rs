//! The simulation pipeline: Context Fetcher -> Post Synthesizer.
//!
//! `ContextFetcher` turns a target (subreddit or user) into a bounded
//! context string; `PostSynthesizer` builds a role-conditioned prompt from
//! it, calls the completion service, and returns free text or a parsed
//! title/body pair. Both stages degrade to placeholder strings instead of
//! failing unless configured to propagate.

pub mod context;
pub mod generate;
pub mod parse;
pub mod prompts;

pub use context::ContextFetcher;
pub use generate::{PostSynthesizer, TextForm};
pub use parse::parse_generated_post;
