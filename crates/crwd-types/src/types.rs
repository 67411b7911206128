use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable numeric identifier of a cause (nonprofit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CauseId(pub u64);

impl fmt::Display for CauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CauseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a collective (donor group) that referred a cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectiveId(pub u64);

impl fmt::Display for CollectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cause supported by the donation box. Read-only to the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cause {
    /// Stable identifier
    pub id: CauseId,
    /// Display name
    pub name: String,
    /// Optional image or avatar reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Cause {
    /// Creates a cause without an image.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id: CauseId(id), name: name.into(), image: None }
    }
}

/// Reference to a cause inside a saved donation box entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseRef {
    /// Identifier of the referenced cause
    pub id: CauseId,
}

/// One entry of a previously saved donation box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxCause {
    /// The cause this entry belongs to
    pub cause: CauseRef,
    /// Saved percentage, if the backend recorded one.
    /// Accepts either a JSON number or a decimal string such as `"25.00"`.
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub percentage: Option<f64>,
    /// Collective that referred the user to this cause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributed_collective: Option<CollectiveId>,
}

impl BoxCause {
    /// Creates a saved entry with a percentage and no attribution.
    pub fn with_percentage(id: u64, percentage: f64) -> Self {
        Self {
            cause: CauseRef { id: CauseId(id) },
            percentage: Some(percentage),
            attributed_collective: None,
        }
    }

    /// Identifier of the cause this entry belongs to.
    pub fn cause_id(&self) -> CauseId {
        self.cause.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Number(f64),
    Text(String),
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<DecimalRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(DecimalRepr::Number(n)) => Some(n),
        Some(DecimalRepr::Text(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_cause_accepts_string_and_number_percentages() {
        let from_string: BoxCause =
            serde_json::from_str(r#"{"cause":{"id":7},"percentage":"25.50"}"#).unwrap();
        assert_eq!(from_string.percentage, Some(25.5));
        assert_eq!(from_string.cause_id(), CauseId(7));

        let from_number: BoxCause =
            serde_json::from_str(r#"{"cause":{"id":7},"percentage":12}"#).unwrap();
        assert_eq!(from_number.percentage, Some(12.0));
    }

    #[test]
    fn box_cause_missing_or_garbage_percentage_is_none() {
        let missing: BoxCause = serde_json::from_str(r#"{"cause":{"id":1}}"#).unwrap();
        assert_eq!(missing.percentage, None);

        let null: BoxCause = serde_json::from_str(r#"{"cause":{"id":1},"percentage":null}"#).unwrap();
        assert_eq!(null.percentage, None);

        let garbage: BoxCause =
            serde_json::from_str(r#"{"cause":{"id":1},"percentage":"abc"}"#).unwrap();
        assert_eq!(garbage.percentage, None);
    }

    #[test]
    fn box_cause_reads_attributed_collective() {
        let entry: BoxCause = serde_json::from_str(
            r#"{"cause":{"id":3},"percentage":50,"attributed_collective":12}"#,
        )
        .unwrap();
        assert_eq!(entry.attributed_collective, Some(CollectiveId(12)));
    }

    #[test]
    fn cause_image_is_optional() {
        let cause: Cause = serde_json::from_str(r#"{"id":4,"name":"Clean Water"}"#).unwrap();
        assert_eq!(cause, Cause::new(4, "Clean Water"));
        let json = serde_json::to_string(&cause).unwrap();
        assert!(!json.contains("image"));
    }
}
