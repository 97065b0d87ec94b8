use serde_json::Value;

/// A single suggestion row.
///
/// Rows are either plain strings or JSON objects carrying payload data.
/// Object rows display their string-typed `"caption"` field when present,
/// otherwise their compact serialization. The display form is the row's
/// identity for deduplication and matching.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Text(String),
    Object { display: String, data: Value },
}

impl Candidate {
    pub fn text(s: impl Into<String>) -> Self {
        Candidate::Text(s.into())
    }

    /// Builds a candidate from a decoded JSON value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => Candidate::Text(s),
            other => {
                let display = match other.get("caption").and_then(Value::as_str) {
                    Some(caption) => caption.to_string(),
                    None => other.to_string(),
                };
                Candidate::Object {
                    display,
                    data: other,
                }
            }
        }
    }

    /// The form shown to the user and used for dedup and scoring.
    pub fn display_string(&self) -> &str {
        match self {
            Candidate::Text(s) => s,
            Candidate::Object { display, .. } => display,
        }
    }

    /// Payload data, present only for object candidates.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Candidate::Text(_) => None,
            Candidate::Object { data, .. } => Some(data),
        }
    }
}
