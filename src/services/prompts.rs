//! Prompt templates for the review agents.
//!
//! Templates are pure string formatting. Callers truncate file content with
//! [`truncate_chars`] before interpolating it.

/// Return the first `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Senior-engineer code review prompt
pub fn code_review_prompt(filename: &str, content: &str) -> String {
    format!(
        "You are a senior software engineer. Perform a code review on {filename}.

1) High level summary of intent.
2) Bugs or syntax errors with line hints.
3) Suggested fixes.
4) Tests to add.
5) Risk areas.

File Content:
{content}
"
    )
}

/// Security engineer vulnerability prompt
pub fn vulnerability_prompt(filename: &str, content: &str) -> String {
    format!(
        "You are a security engineer. Analyze {filename} for vulnerabilities:
- XSS
- SQL injection
- Insecure deserialization
- File handling issues
- Secrets in code
- Misconfigurations

Give severity and fixes.

Content:
{content}
"
    )
}

/// Performance engineer prompt
pub fn efficiency_prompt(filename: &str, content: &str) -> String {
    format!(
        "You are a performance engineer. Review {filename} for:
- Algorithm inefficiencies
- Memory/CPU issues
- Inefficient I/O

Give suggestions and code examples.

Content:
{content}
"
    )
}

/// Release manager impact prompt
pub fn impact_prompt(filename: &str, content: &str) -> String {
    format!(
        "You are a release manager. Based on {filename} changes, give:
- Impact on services/modules/configs
- DB migration needs
- Backward compatibility
- Rollout strategy
- Tests and monitoring

Content:
{content}
"
    )
}

/// Composite prompt embedding the four analysis replies verbatim.
pub fn approval_prompt(review: &str, vulnerability: &str, efficiency: &str, impact: &str) -> String {
    format!(
        "You are the Head of Engineering.

Summarize:
--- CODE REVIEW ---
{review}

--- VULNERABILITY ---
{vulnerability}

--- EFFICIENCY ---
{efficiency}

--- IMPACT ---
{impact}

Give a verdict: approve or reject, and list any constraints.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_shorter_text_is_unchanged() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_truncate_zero() {
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_approval_prompt_sections_in_order() {
        let prompt = approval_prompt("R", "V", "E", "I");
        let review = prompt.find("--- CODE REVIEW ---\nR\n").unwrap();
        let vuln = prompt.find("--- VULNERABILITY ---\nV\n").unwrap();
        let eff = prompt.find("--- EFFICIENCY ---\nE\n").unwrap();
        let impact = prompt.find("--- IMPACT ---\nI\n").unwrap();

        assert!(review < vuln && vuln < eff && eff < impact);
        assert!(prompt.ends_with("Give a verdict: approve or reject, and list any constraints.\n"));
    }

    #[test]
    fn test_domain_prompts_mention_filename_and_content() {
        for prompt in [
            code_review_prompt("App.java", "class App {}"),
            vulnerability_prompt("App.java", "class App {}"),
            efficiency_prompt("App.java", "class App {}"),
            impact_prompt("App.java", "class App {}"),
        ] {
            assert!(prompt.contains("App.java"));
            assert!(prompt.ends_with("class App {}\n"));
        }
    }

    proptest! {
        #[test]
        fn prop_truncate_is_char_prefix(text in ".*", max in 0usize..64) {
            let truncated = truncate_chars(&text, max);
            prop_assert!(text.starts_with(truncated));
            prop_assert_eq!(truncated.chars().count(), text.chars().count().min(max));
        }
    }
}
