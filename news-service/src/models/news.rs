use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single news entry as stored and as returned to clients. The store's
/// internal document id is never part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    // TODO: move date to an actual date type
    pub date: String,
    pub title: String,
    pub description: String,
}

const ACCEPTED_FIELDS: [&str; 3] = ["date", "title", "description"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NewsItemError {
    #[error("body must be a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be a string")]
    NotAString(&'static str),
    #[error("unexpected field `{0}`")]
    UnexpectedField(String),
}

impl NewsItem {
    /// Strict construction from a request body: exactly the three required
    /// string fields, nothing else.
    pub fn from_json(body: &Value) -> Result<Self, NewsItemError> {
        let map = body.as_object().ok_or(NewsItemError::NotAnObject)?;

        if let Some(unexpected) = map.keys().find(|k| !ACCEPTED_FIELDS.contains(&k.as_str())) {
            return Err(NewsItemError::UnexpectedField(unexpected.clone()));
        }

        let field = |name: &'static str| -> Result<String, NewsItemError> {
            map.get(name)
                .ok_or(NewsItemError::MissingField(name))?
                .as_str()
                .map(str::to_string)
                .ok_or(NewsItemError::NotAString(name))
        };

        Ok(NewsItem {
            date: field("date")?,
            title: field("title")?,
            description: field("description")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_exactly_the_three_string_fields() {
        let item = NewsItem::from_json(&json!({
            "date": "2024-01-01",
            "title": "Launch",
            "description": "v1 released"
        }))
        .unwrap();

        assert_eq!(item.date, "2024-01-01");
        assert_eq!(item.title, "Launch");
        assert_eq!(item.description, "v1 released");
    }

    #[test]
    fn rejects_missing_field() {
        let err = NewsItem::from_json(&json!({ "title": "Missing date" })).unwrap_err();
        assert_eq!(err, NewsItemError::MissingField("date"));
    }

    #[test]
    fn rejects_unexpected_field() {
        let err = NewsItem::from_json(&json!({
            "date": "x",
            "title": "y",
            "description": "z",
            "extra": "field"
        }))
        .unwrap_err();
        assert_eq!(err, NewsItemError::UnexpectedField("extra".to_string()));
    }

    #[test]
    fn rejects_non_string_field() {
        let err = NewsItem::from_json(&json!({
            "date": 20240101,
            "title": "y",
            "description": "z"
        }))
        .unwrap_err();
        assert_eq!(err, NewsItemError::NotAString("date"));
    }

    #[test]
    fn rejects_non_object_body() {
        let err = NewsItem::from_json(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err, NewsItemError::NotAnObject);
    }
}
