//! AI-suggested opening questions.
//!
//! The model is asked for three questions joined by `||`. Its output is not
//! validated; splitting simply yields whatever non-empty parts it produced.

/// Separator between suggested questions in the model output.
pub const SUGGESTION_DELIMITER: &str = "||";

/// Split raw model output into individual questions.
///
/// Parts are trimmed, wrapping quotes the model sometimes echoes from the
/// prompt's example are removed, and empty parts are dropped.
///
/// ```
/// use true_feedback_core::suggestions::split_suggestions;
///
/// let questions = split_suggestions("'What inspires you?||Favourite season?'");
/// assert_eq!(questions, vec!["What inspires you?", "Favourite season?"]);
/// ```
#[must_use]
pub fn split_suggestions(raw: &str) -> Vec<String> {
    unquote(raw.trim())
        .split(SUGGESTION_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Strip one pair of matching quotes wrapping the whole text.
fn unquote(text: &str) -> &str {
    ['\'', '"']
        .into_iter()
        .find_map(|quote| {
            text.strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_questions() {
        let raw = "What's a hobby you've recently started?||If you could have dinner with any historical figure, who would it be?||What's a simple thing that makes you happy?";
        let questions = split_suggestions(raw);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[2], "What's a simple thing that makes you happy?");
    }

    #[test]
    fn test_whitespace_and_trailing_newline() {
        let questions = split_suggestions("  One? ||  Two?||Three?\n");
        assert_eq!(questions, vec!["One?", "Two?", "Three?"]);
    }

    #[test]
    fn test_unexpected_shapes_pass_through() {
        assert_eq!(split_suggestions("Just one question?"), vec!["Just one question?"]);
        assert!(split_suggestions("").is_empty());
        assert_eq!(split_suggestions("A?||||B?"), vec!["A?", "B?"]);
    }

    #[test]
    fn test_quotes_kept_unless_they_wrap_everything() {
        let raw = r#"What is your dream job?||Which book changed you?||Finish the word "hope""#;
        let questions = split_suggestions(raw);
        assert_eq!(questions[2], r#"Finish the word "hope""#);

        assert_eq!(split_suggestions(r#""One?||Two?""#), vec!["One?", "Two?"]);
        assert_eq!(
            split_suggestions("'Who made you smile today?"),
            vec!["'Who made you smile today?"]
        );
    }
}
