use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier.
///
/// The backend hands ids out as JSON numbers or strings depending on the
/// endpoint, both are kept as text.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(serde_json::Number),
    Text(String),
}

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireId::deserialize(deserializer)? {
            WireId::Number(number) => Self(number.to_string()),
            WireId::Text(text) => Self(text.trim().to_string()),
        })
    }
}

/// `null`, a missing field and `""` all mean "no id yet"
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<RecordId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.0.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<RecordId>,
    }

    #[test_case(r#"{"id": 12}"#, Some("12"); "number")]
    #[test_case(r#"{"id": "12"}"#, Some("12"); "string")]
    #[test_case(r#"{"id": " 12 "}"#, Some("12"); "padded string")]
    #[test_case(r#"{"id": 1735389182123}"#, Some("1735389182123"); "timestamp")]
    #[test_case(r#"{"id": ""}"#, None; "empty string")]
    #[test_case(r#"{"id": null}"#, None; "null")]
    #[test_case(r#"{}"#, None; "missing")]
    fn test_wire_ids(json: &str, expected: Option<&str>) {
        let holder: Holder = serde_json::from_str(json).unwrap();
        assert_eq!(holder.id.as_ref().map(RecordId::as_str), expected);
    }

    #[test]
    fn test_serializes_as_string() {
        assert_eq!(serde_json::to_string(&RecordId::from(5)).unwrap(), r#""5""#);
    }
}
