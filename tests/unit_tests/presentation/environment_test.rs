use chat_history::domain::HistoryScope;
use chat_history::presentation::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_variants_match() {
    assert_eq!(
        Environment::try_from("local".to_string()),
        Ok(Environment::Local)
    );
    assert_eq!(
        Environment::try_from("TEST".to_string()),
        Ok(Environment::Test)
    );
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
}

#[test]
fn given_unknown_name_when_parsing_environment_then_error_names_it() {
    let result = Environment::try_from("staging".to_string());

    assert!(result.unwrap_err().contains("staging"));
}

#[test]
fn given_history_scope_names_when_deserializing_then_lowercase_is_accepted() {
    let scope: HistoryScope = serde_json::from_str(r#""user""#).unwrap();
    let default_scope = HistoryScope::default();

    assert_eq!(scope, HistoryScope::User);
    assert_eq!(default_scope, HistoryScope::Conversation);
}
