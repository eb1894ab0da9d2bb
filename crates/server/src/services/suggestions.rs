//! AI-generated conversation starters for the public profile page.

use true_feedback_core::payloads::SuggestionsPayload;
use true_feedback_core::suggestions::split_suggestions;

use crate::gemini::{GeminiClient, GeminiError};

/// Prompt sent on every request. Output is three questions joined by `||`.
pub const SUGGESTION_PROMPT: &str = "Create a list of three open-ended and engaging questions formatted as a single string. Each question should be separated by '||'. These questions are for an anonymous social messaging platform, like Qooh.me, and should be suitable for a diverse audience. Avoid personal or sensitive topics, focusing instead on universal themes that encourage friendly interaction. For example, your output should be structured like this: 'What\u{2019}s a hobby you\u{2019}ve recently started?||If you could have dinner with any historical figure, who would it be?||What\u{2019}s a simple thing that makes you happy?'. Ensure the questions are intriguing, foster curiosity, and contribute to a positive and welcoming conversational environment.";

/// Ask the model for a fresh set of suggestions.
///
/// The raw text is passed through alongside its split form; the number of
/// questions is whatever the model produced.
///
/// # Errors
///
/// Returns the underlying `GeminiError`; callers report every variant the
/// same way.
pub async fn generate(client: &GeminiClient) -> Result<SuggestionsPayload, GeminiError> {
    let raw = client.generate_text(SUGGESTION_PROMPT).await?;
    let questions = split_suggestions(&raw);
    tracing::debug!(
        model = client.model(),
        count = questions.len(),
        "Generated message suggestions"
    );
    Ok(SuggestionsPayload {
        suggestions: raw,
        questions,
    })
}
