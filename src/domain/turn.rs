use super::MessageRole;

/// One entry of the dialogue as handed to the generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
}

impl Turn {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Model, text)
    }
}
