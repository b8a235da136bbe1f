//! Schema types for the content system's manifest and page-type index.
//!
//! Only the fields this tool reads are typed; everything else is carried as
//! raw JSON so a load/save cycle leaves foreign keys, values and order intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `manifest.json`: ordered list of published content entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub entries: Vec<Entry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestDocument {
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.entries.iter().any(|entry| entry.slug() == Some(slug))
    }
}

/// One manifest entry, keyed by `slug`.
///
/// Held as the raw JSON object so entries this tool did not add are written
/// back exactly as read: same keys, same order, same value types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Entry {
    fields: Map<String, Value>,
}

impl Entry {
    /// Build an entry with `slug` first, followed by `fields` in order.
    pub fn new(slug: impl Into<String>, fields: Map<String, Value>) -> Self {
        let mut map = Map::new();
        map.insert("slug".to_string(), Value::String(slug.into()));
        map.extend(fields);
        Self { fields: map }
    }

    /// The entry's slug, when it is a string. Other types never match.
    pub fn slug(&self) -> Option<&str> {
        self.fields.get("slug").and_then(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for Entry {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        if !fields.contains_key("slug") {
            return Err("manifest entry is missing field `slug`".to_string());
        }
        Ok(Self { fields })
    }
}

impl From<Entry> for Map<String, Value> {
    fn from(entry: Entry) -> Self {
        entry.fields
    }
}

/// `page-types.json`: slug to content-type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTypesDocument {
    pub types: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageTypesDocument {
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.types.contains_key(slug)
    }
}
