//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Count followed by a singular or plural noun.
///
/// Usage in templates: `{{ messages.len()|count_noun("message") }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn count_noun(
    count: impl Display,
    _env: &dyn askama::Values,
    noun: &str,
) -> askama::Result<String> {
    let count = count.to_string();
    let suffix = if count == "1" { "" } else { "s" };
    Ok(format!("{count} {noun}{suffix}"))
}
