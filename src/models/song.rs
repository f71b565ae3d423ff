use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{asset::Asset, comment::Comment};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Song {
    pub id: String,

    pub title: String,
    pub artwork: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    pub original: bool,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub note: Option<String>,

    // Audio assets
    pub mp3: String,
    #[serde(default)]
    pub wav: Option<String>,
    #[serde(default)]
    pub flac: Option<String>,
    pub duration: u32, // seconds

    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
}

/// A song as returned by the API, with its derived attributes and relations.
#[derive(Debug, Serialize, Clone)]
pub struct SongView {
    #[serde(flatten)]
    pub song: Song,
    pub released: bool,
    pub released_ago: Option<String>,
    pub albums: Vec<String>,
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

/// Validated multipart payload of a song creation.
#[derive(Debug, Clone)]
pub struct CreateSongRequest {
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub original: bool,
    pub youtube: Option<String>,
    pub note: Option<String>,
    pub lyrics: Option<String>,
    pub features: Option<String>,
    pub albums: Vec<String>,
    pub alternatives: Vec<String>,
    pub artwork: Asset,
    pub mp3: Asset,
    pub wav: Option<Asset>,
    pub flac: Option<Asset>,
}

/// Partial update of a song. `None` leaves the stored value untouched, a list
/// replaces the relation entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModifySongRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub original: Option<bool>,
    pub youtube: Option<String>,
    pub note: Option<String>,
    pub lyrics: Option<String>,
    pub features: Option<String>,
    pub albums: Option<Vec<String>>,
    pub alternatives: Option<Vec<String>>,
}
