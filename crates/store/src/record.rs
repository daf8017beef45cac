use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Literal status value that marks a record as visible.
pub const ACTIVE_STATUS: &str = "Active";

/// Visibility of an instruction record.
///
/// Stored documents encode "visible" four different ways: the literal
/// `"Active"`, a missing field, `null`, or an empty string. All four
/// collapse to [`InstructionStatus::Active`] when a record is decoded, so
/// nothing downstream has to repeat the special case. Any other value is
/// kept verbatim in [`InstructionStatus::Other`] and excludes the record
/// from every listing, search and match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InstructionStatus {
    #[default]
    Active,
    Other(String),
}

impl InstructionStatus {
    /// Normalize a raw stored status value.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ACTIVE_STATUS) => InstructionStatus::Active,
            Some(other) => InstructionStatus::Other(other.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, InstructionStatus::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            InstructionStatus::Active => ACTIVE_STATUS,
            InstructionStatus::Other(value) => value,
        }
    }
}

impl Serialize for InstructionStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstructionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => InstructionStatus::Active,
            Value::String(raw) => InstructionStatus::from_raw(Some(&raw)),
            // Non-string values can never equal the active literal.
            other => InstructionStatus::Other(other.to_string()),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A care/usage instruction document.
///
/// Field names on the wire follow the stored documents (`ID`, `Ingredient`,
/// `createdAt`). Every other field is instructional content the store and
/// matcher never interpret; it is captured in `body` and echoed back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionRecord {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Ingredient", default, deserialize_with = "null_as_empty")]
    pub ingredient: String,

    #[serde(default)]
    pub status: InstructionStatus,

    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl InstructionRecord {
    /// Create an active record with no instructional content.
    pub fn new(id: impl Into<String>, ingredient: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ingredient: ingredient.into(),
            status: InstructionStatus::Active,
            created_at: None,
            body: Map::new(),
        }
    }

    pub fn with_status(mut self, status: InstructionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.body.insert(key.into(), value);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
