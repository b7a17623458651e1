use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A work item as fetched from the tracker. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWorkItem {
    #[serde(default)]
    pub id: String,
    pub human_id: Option<String>,
    pub project_id: Option<String>,
    pub summary: Option<String>,
    pub assignee_id: Option<String>,
    pub start_date: Option<i64>,
    pub due_date: Option<i64>,
    pub created: Option<i64>,
    pub updated: Option<i64>,
    pub resolved: Option<i64>,
    #[serde(default)]
    pub custom_fields: Vec<RawCustomField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCustomField {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    #[default]
    Outward,
    Inward,
    Both,
}

/// A link between two work items, read from `source`'s side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    pub source: String,
    pub target: String,
    pub link_type: String,
    #[serde(default)]
    pub direction: LinkDirection,
}

/// Everything the engine consumes for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<RawWorkItem>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// A custom attribute value after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Date(DateTime<Utc>),
    Duration { minutes: i64 },
    Enum(String),
    User(String),
    Scalar(Value),
    Empty,
}

impl FieldValue {
    /// Classify a raw JSON value. `date_like` tells whether the attribute name
    /// marks it as a date, which is the only way to tell a timestamp from a number.
    pub fn classify(value: &Value, date_like: bool) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Number(n) if date_like => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(Self::Date)
                .unwrap_or_else(|| Self::Scalar(value.clone())),
            Value::String(s) if date_like => DateTime::parse_from_rfc3339(s)
                .map(|d| Self::Date(d.with_timezone(&Utc)))
                .unwrap_or_else(|_| Self::Scalar(value.clone())),
            Value::Object(map) => {
                if let Some(minutes) = map.get("minutes").and_then(Value::as_i64) {
                    Self::Duration { minutes }
                } else if let Some(login) = map.get("login").and_then(Value::as_str) {
                    Self::User(login.to_string())
                } else if let Some(name) = map.get("name").and_then(Value::as_str) {
                    Self::Enum(name.to_string())
                } else {
                    Self::Scalar(value.clone())
                }
            }
            _ => Self::Scalar(value.clone()),
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_minutes(&self) -> Option<i64> {
        match self {
            Self::Duration { minutes } => Some(*minutes),
            _ => None,
        }
    }
}
