//! Sanitization of raw model responses before parsing.
//!
//! The extraction prompt demands a raw JSON object without markdown
//! fencing, but models do not reliably comply, so fence stripping runs
//! unconditionally on every response.

/// Strip a leading markdown code fence (optionally tagged `json`) and
/// any trailing fence, then trim whitespace. A no-op on fence-free
/// text, so applying it twice yields the same result.
pub fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    trimmed
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end()
        .trim_end_matches('`')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_free_text_is_unchanged() {
        assert_eq!(strip_code_fences(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn strips_json_tagged_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn strips_untagged_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn strips_fence_without_trailing_marker() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}"), r#"{"a":1}"#);
    }

    #[test]
    fn idempotent_on_already_stripped_text() {
        let once = strip_code_fences("```json\n{\"a\":1}\n```");
        let twice = strip_code_fences(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(strip_code_fences("  \n{\"a\":1}\n  "), r#"{"a":1}"#);
    }

    #[test]
    fn empty_response_stays_empty() {
        assert_eq!(strip_code_fences(""), "");
        assert_eq!(strip_code_fences("```json\n```"), "");
    }
}
