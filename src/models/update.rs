use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news post. References are informational only and may dangle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Update {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>, // refreshed on every save
    #[serde(default)]
    pub song_ids: Vec<String>,
    #[serde(default)]
    pub album_ids: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct UpdateView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub references_songs: Vec<Reference>,
    pub references_albums: Vec<Reference>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Reference {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateUpdateRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub songs: Vec<String>,
    #[serde(default)]
    pub albums: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModifyUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub songs: Option<Vec<String>>,
    pub albums: Option<Vec<String>>,
}
