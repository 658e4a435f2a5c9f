use crate::parse::parse_generated_post;
use crate::prompts;
use llm_interface::{CompletionRequest, CompletionService};
use simulator_core::{CoreError, ErrorPolicy, GeneratedPost, Outcome, Target};
use tracing::{debug, warn};

/// Sampling temperature for every synthesis call. High-variance output is
/// intentional; deterministic reproduction is not a requirement.
pub const TEMPERATURE: f32 = 0.9;
pub const LONG_FORM_MAX_TOKENS: u32 = 500;
pub const SHORT_FORM_MAX_TOKENS: u32 = 300;

/// Free-text output flavors, each with its own token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    /// Full posts (chat-bot and CLI callers).
    Long,
    /// Replies (stream-listener callers).
    Short,
}

impl TextForm {
    pub fn max_tokens(self) -> u32 {
        match self {
            TextForm::Long => LONG_FORM_MAX_TOKENS,
            TextForm::Short => SHORT_FORM_MAX_TOKENS,
        }
    }

    fn error_prefix(self) -> &'static str {
        match self {
            TextForm::Long => "Error generating post",
            TextForm::Short => "Error generating content",
        }
    }
}

/// Builds a role-conditioned prompt from a context, calls the completion
/// service, and returns output in the shape the caller needs.
pub struct PostSynthesizer<C> {
    completion: C,
    policy: ErrorPolicy,
}

impl<C: CompletionService> PostSynthesizer<C> {
    pub fn new(completion: C, policy: ErrorPolicy) -> Self {
        Self { completion, policy }
    }

    pub fn completion(&self) -> &C {
        &self.completion
    }

    /// Free-form satirical text in the style of the target.
    pub async fn synthesize_text(
        &self,
        context: &str,
        target: &Target,
        form: TextForm,
    ) -> Result<Outcome<String>, CoreError> {
        match self.complete(context, target, false, form.max_tokens()).await {
            Ok(text) => Ok(Outcome::Produced(text)),
            Err(e) => match self.policy {
                ErrorPolicy::Degrade => {
                    warn!("Synthesis for {} degraded: {}", target, e);
                    Ok(Outcome::Degraded(format!("{}: {}", form.error_prefix(), e)))
                }
                ErrorPolicy::Propagate => Err(e),
            },
        }
    }

    /// A parsed title/body pair. Responses that don't match the labeled
    /// shape fall back (default title, raw text body) instead of failing.
    pub async fn synthesize_post(
        &self,
        context: &str,
        target: &Target,
    ) -> Result<Outcome<GeneratedPost>, CoreError> {
        match self.complete(context, target, true, LONG_FORM_MAX_TOKENS).await {
            Ok(text) => Ok(Outcome::Produced(parse_generated_post(&text))),
            Err(e) => match self.policy {
                ErrorPolicy::Degrade => {
                    warn!("Synthesis for {} degraded: {}", target, e);
                    let placeholder = format!("Error generating post: {e}");
                    Ok(Outcome::Degraded(parse_generated_post(&placeholder)))
                }
                ErrorPolicy::Propagate => Err(e),
            },
        }
    }

    async fn complete(
        &self,
        context: &str,
        target: &Target,
        structured: bool,
        max_tokens: u32,
    ) -> Result<String, CoreError> {
        let request = CompletionRequest {
            system_prompt: prompts::system_prompt(target, structured),
            user_prompt: prompts::user_prompt(context, target),
            max_tokens,
            temperature: TEMPERATURE,
        };
        debug!("Synthesizing for {} (structured={})", target, structured);
        self.completion.complete(&request).await
    }
}
