pub mod groq;

pub use groq::GroqClient;

use simulator_core::CoreError;

/// One text-completion round trip: system + user message in, text out.
/// No streaming.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

pub trait CompletionService {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CoreError>;
}
