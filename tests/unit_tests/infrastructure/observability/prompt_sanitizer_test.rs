use chat_history::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_prompt() {
    assert_eq!(sanitize_prompt("  What is Rust?  "), "What is Rust?");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);

    let result = sanitize_prompt(&prompt);

    assert!(result.starts_with(&"a".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_cuts_on_char_boundary() {
    let prompt = "é".repeat(120);

    let result = sanitize_prompt(&prompt);

    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.ends_with("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz please");

    assert_eq!(result, "Authorization: Bearer [REDACTED] please");
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_redacts_each_of_them() {
    let result = sanitize_prompt("token=one&token=two password=hunter2");

    assert!(!result.contains("one"));
    assert!(!result.contains("two"));
    assert!(!result.contains("hunter2"));
    assert_eq!(
        result,
        "token=[REDACTED]&token=[REDACTED] password=[REDACTED]"
    );
}
