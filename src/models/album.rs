use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{asset::Asset, song::SongView};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Album {
    pub id: String,

    pub title: String,
    #[serde(default)]
    pub artwork: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    pub original: bool,
    #[serde(default)]
    pub youtube: Option<String>,
    pub ep: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct AlbumView {
    #[serde(flatten)]
    pub album: Album,
    pub released: bool,
    pub released_ago: Option<String>,
    pub duration: u32,
    pub number_of_songs: usize,
    pub alternatives: Vec<String>,
    pub songs: Vec<AlbumSongView>,
}

/// A member song of an album together with its position.
#[derive(Debug, Serialize, Clone)]
pub struct AlbumSongView {
    pub track_number: u32,
    #[serde(flatten)]
    pub song: SongView,
}

#[derive(Debug, Clone)]
pub struct CreateAlbumRequest {
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub original: bool,
    pub youtube: Option<String>,
    pub ep: bool,
    pub note: Option<String>,
    pub songs: Vec<String>,
    pub alternatives: Vec<String>,
    pub artwork: Option<Asset>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModifyAlbumRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub original: Option<bool>,
    pub youtube: Option<String>,
    pub ep: Option<bool>,
    pub note: Option<String>,
    pub alternatives: Option<Vec<String>>,
}
