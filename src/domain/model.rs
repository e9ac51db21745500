use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque upstream record. Its shape belongs to the upstream service.
pub type Record = serde_json::Value;

/// A single outbound query-string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    /// Threshold filter, sent upstream as `>=N`.
    AtLeast(i64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Integer(n) => write!(f, "{}", n),
            QueryValue::AtLeast(n) => write!(f, ">={}", n),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(value.into())
    }
}

/// Outbound parameter mapping, built fresh for every inbound request.
///
/// A key is present only when the caller supplied a value for it. Insertion
/// order is kept so the query string is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEnvelope {
    params: Vec<(&'static str, QueryValue)>,
}

impl QueryEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: QueryValue) {
        match self.params.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }

    pub fn insert_opt(&mut self, name: &'static str, value: Option<QueryValue>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(key, _)| *key)
    }

    /// Name/value pairs ready for `reqwest::RequestBuilder::query`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.params
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect()
    }
}

/// Uniform success body: `{success, count, data}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Record>,
}

impl Envelope {
    pub fn from_records(data: Vec<Record>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Failure body. The HTTP status travels on the response itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Session identifier. `latest` is passed through for the upstream to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SessionKey {
    Latest,
    Key(u32),
}

impl FromStr for SessionKey {
    type Err = String;

    /// Only canonical spellings are accepted, so `to_string` gives back the
    /// exact text the caller sent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "latest" {
            return Ok(SessionKey::Latest);
        }
        let canonical = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        if !canonical {
            return Err(format!("session_key must be a number or 'latest', got '{}'", s));
        }
        s.parse::<u32>()
            .map(SessionKey::Key)
            .map_err(|_| format!("session_key out of range: '{}'", s))
    }
}

impl TryFrom<String> for SessionKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionKey> for String {
    fn from(value: SessionKey) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKey::Latest => f.write_str("latest"),
            SessionKey::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<SessionKey> for QueryValue {
    fn from(value: SessionKey) -> Self {
        match value {
            SessionKey::Latest => QueryValue::Text("latest".to_string()),
            SessionKey::Key(key) => QueryValue::Integer(key.into()),
        }
    }
}

/// Values the upstream uses for `session_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    Race,
    Qualifying,
    Practice,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Race => "Race",
            SessionType::Qualifying => "Qualifying",
            SessionType::Practice => "Practice",
        }
    }
}

impl From<SessionType> for QueryValue {
    fn from(value: SessionType) -> Self {
        QueryValue::Text(value.as_str().to_string())
    }
}
