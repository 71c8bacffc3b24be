use crate::*;
use serde::Serialize;

/// What a suggestion inserts; drives the icon an editor shows next to it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    #[display("keyword")]
    Keyword,
    #[display("function")]
    Function,
    #[display("field")]
    Field,
    #[display("value")]
    Value,
    #[display("text")]
    Text,
}

/// An autocomplete suggestion, created once the intents of a request have been
/// resolved and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[display("{text}")]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<DataType>,
}
pub type Suggestions = Vec<Suggestion>;

impl Suggestion {
    pub fn new(text: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            text: text.into(),
            kind,
            field_type: None,
        }
    }

    pub fn field(name: impl Into<String>, field_type: Option<DataType>) -> Self {
        Self {
            field_type,
            ..Self::new(name, SuggestionKind::Field)
        }
    }

    pub fn value(text: impl Into<String>) -> Self {
        Self::new(text, SuggestionKind::Value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_as_type() {
        let json = serde_json::to_value(Suggestion::field("status", Some(DataType::Keyword)))
            .expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"text": "status", "type": "field", "fieldType": "keyword"})
        );

        let json = serde_json::to_value(Suggestion::new("SELECT", SuggestionKind::Keyword))
            .expect("serializable");
        assert_eq!(json, serde_json::json!({"text": "SELECT", "type": "keyword"}));
    }

    #[test]
    fn displays_text() {
        assert_eq!(Suggestion::value("'open'").to_string(), "'open'");
        assert_eq!(SuggestionKind::Function.to_string(), "function");
    }
}
