//! Intents produced by the interpreter.

use serde::Deserialize;

use super::InterpreterError;

/// What the customer asked for.
///
/// Wire format (tagged by `type`):
///
/// ```json
/// {"type": "order", "items": [{"item": "burgers", "quantity": 2}]}
/// {"type": "cancel", "order_id": 3}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Intent {
    Order {
        #[serde(default)]
        items: Vec<RequestedItem>,
    },
    Cancel {
        order_id: i32,
    },
}

/// An item as named by the interpreter, before menu validation.
///
/// Kept loose on purpose: the model may name things that are not on the
/// menu or give zero/negative quantities, and those are filtered later.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestedItem {
    pub item: String,
    pub quantity: i64,
}

impl Intent {
    /// Parse an intent out of a model completion.
    ///
    /// Models tend to wrap JSON in prose, so only the outermost `{...}` span
    /// is parsed.
    ///
    /// # Errors
    ///
    /// Returns `InterpreterError::Parse` if the completion contains no JSON
    /// object or the object is not a valid intent.
    pub fn from_completion(text: &str) -> Result<Self, InterpreterError> {
        let json = extract_json_object(text).ok_or_else(|| {
            InterpreterError::Parse(format!("no JSON object in completion: {text:?}"))
        })?;

        serde_json::from_str(json)
            .map_err(|e| InterpreterError::Parse(format!("invalid intent {json:?}: {e}")))
    }
}

/// The span from the first `{` to the last `}` (inclusive), if any.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    text.get(start..=end)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object() {
        assert_eq!(
            extract_json_object("Sure! {\"type\": \"cancel\", \"order_id\": 1} Thanks"),
            Some("{\"type\": \"cancel\", \"order_id\": 1}")
        );
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_order_intent() {
        let intent = Intent::from_completion(
            r#" {"type": "order", "items": [{"item": "burgers", "quantity": 2}, {"item": "pizza", "quantity": 1}]}"#,
        )
        .unwrap();

        assert_eq!(
            intent,
            Intent::Order {
                items: vec![
                    RequestedItem {
                        item: "burgers".to_string(),
                        quantity: 2
                    },
                    RequestedItem {
                        item: "pizza".to_string(),
                        quantity: 1
                    },
                ]
            }
        );
    }

    #[test]
    fn test_order_intent_without_items() {
        let intent = Intent::from_completion(r#"{"type": "order"}"#).unwrap();
        assert_eq!(intent, Intent::Order { items: Vec::new() });
    }

    #[test]
    fn test_cancel_intent() {
        let intent = Intent::from_completion(r#"{"type": "cancel", "order_id": 7}"#).unwrap();
        assert_eq!(intent, Intent::Cancel { order_id: 7 });
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let err = Intent::from_completion(r#"{"type": "refund", "order_id": 7}"#).unwrap_err();
        assert!(matches!(err, InterpreterError::Parse(_)));
    }

    #[test]
    fn test_missing_json_is_parse_error() {
        let err = Intent::from_completion("I can only help with food orders.").unwrap_err();
        assert!(matches!(err, InterpreterError::Parse(_)));
    }
}
