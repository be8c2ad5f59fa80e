//! Externally visible selection tokens

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

/// One selected entry as handed to the host through the change listener.
///
/// Tokens are a projection of a tree node, decoupled from the tree itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_parent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u32>,
}

impl Token {
    /// Creates a plain token.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            is_parent: None,
            counter: None,
        }
    }
}

/// Collects the ids of the given tokens.
pub fn token_ids(tokens: &[Token]) -> HashSet<String> {
    tokens.iter().map(|t| t.value.clone()).collect()
}

/// Finds the first token with the given label.
pub fn find_token_by_label<'a>(tokens: &'a [Token], label: &str) -> Option<&'a Token> {
    tokens.iter().find(|t| t.label == label)
}
