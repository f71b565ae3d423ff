use serde::{Deserialize, Serialize};

/// Membership of a song in an album, with its 1-based position.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Track {
    pub album_id: String,
    pub song_id: String,
    pub track_number: u32,
}

/// A single write against the tracks of one album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackChange {
    Insert { song_id: String, track_number: u32 },
    Delete { song_id: String },
    Renumber { song_id: String, track_number: u32 },
}

/// Which self-referential "alternatives" relation an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlternativeKind {
    Song,
    Album,
}

impl AlternativeKind {
    pub fn table(self) -> &'static str {
        match self {
            AlternativeKind::Song => "song_alternative",
            AlternativeKind::Album => "album_alternative",
        }
    }
}

/// Orders an alternative pair so `{a, b}` and `{b, a}` share one key.
pub fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
