use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder for metadata the catalog does not carry
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the catalog: a movie or show and its descriptive metadata
///
/// Every field is standardized to a string when the artifact is decoded, so
/// numeric years, nulls and missing keys all arrive in the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "type", default = "not_available", deserialize_with = "lenient_string")]
    pub content_type: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub director: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub cast: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub date_added: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub release_year: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub rating: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub duration: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub listed_in: String,
    #[serde(default = "not_available", deserialize_with = "lenient_string")]
    pub description: String,
}

impl CatalogEntry {
    /// Creates an entry with only a title; all metadata is "N/A"
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self {
            title: not_available(),
            content_type: not_available(),
            director: not_available(),
            cast: not_available(),
            country: not_available(),
            date_added: not_available(),
            release_year: not_available(),
            rating: not_available(),
            duration: not_available(),
            listed_in: not_available(),
            description: not_available(),
        }
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Accepts a string, number, bool or null and yields a string
///
/// Null and blank strings become "N/A".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => not_available(),
        Some(Value::String(s)) if s.trim().is_empty() => not_available(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
