// ABOUTME: Serde models for the audit input document.
// ABOUTME: Channel, Item and Statistics mirror the acquisition collaborator's JSON verbatim.

use serde::{Deserialize, Deserializer, Serialize};

/// View, like and comment counters for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(deserialize_with = "count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub comment_count: u64,
}

/// The audited channel. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "count")]
    pub subscriber_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub video_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub view_count: u64,
}

/// One content piece in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category_id: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    pub statistics: Statistics,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            published_at: String::new(),
            tags: Vec::new(),
            category_id: String::new(),
            duration: default_duration(),
            statistics: Statistics::default(),
        }
    }
}

/// The whole input document handed over by the acquisition step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDocument {
    pub channel: Channel,
    #[serde(alias = "items")]
    pub videos: Vec<Item>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

fn default_duration() -> String {
    "PT0S".to_string()
}

/// Accepts counters as JSON numbers or numeric strings (the platform API
/// serialises statistics as strings).
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid count {s:?}"))),
    }
}
