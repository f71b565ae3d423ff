//! Persistence of the catalog.
//!
//! Every operation that touches more than one record is atomic: it either
//! fully applies or leaves the store unchanged.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{
        album::Album,
        comment::Comment,
        song::Song,
        track::{AlternativeKind, Track, TrackChange},
        update::Update,
    },
};

pub mod memory_store;
pub mod surreal_store;

pub use memory_store::MemoryStore;
pub use surreal_store::SurrealStore;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // -- Songs
    async fn put_song(&self, song: &Song) -> Result<()>;
    async fn get_song(&self, id: &str) -> Result<Option<Song>>;
    async fn get_songs(&self, ids: &[String]) -> Result<Vec<Song>>;
    /// All songs, by title.
    async fn list_songs(&self) -> Result<Vec<Song>>;
    /// Removes the song, its comments and its alternative edges. Tracks are
    /// left to the sequencer.
    async fn delete_song(&self, id: &str) -> Result<()>;

    // -- Albums
    async fn put_album(&self, album: &Album) -> Result<()>;
    async fn get_album(&self, id: &str) -> Result<Option<Album>>;
    async fn get_albums(&self, ids: &[String]) -> Result<Vec<Album>>;
    /// All albums, by title.
    async fn list_albums(&self) -> Result<Vec<Album>>;
    /// Removes the album, all of its tracks and its alternative edges.
    async fn delete_album(&self, id: &str) -> Result<()>;

    // -- Tracks
    /// Tracks of an album ordered by track number.
    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>>;
    async fn song_tracks(&self, song_id: &str) -> Result<Vec<Track>>;
    async fn apply_track_changes(&self, album_id: &str, changes: &[TrackChange]) -> Result<()>;

    // -- Alternatives
    async fn alternatives(&self, kind: AlternativeKind, id: &str) -> Result<Vec<String>>;
    /// Drops every edge touching `id` and links it to each of `others`.
    async fn replace_alternatives(
        &self,
        kind: AlternativeKind,
        id: &str,
        others: &[String],
    ) -> Result<()>;

    // -- Comments
    async fn put_comment(&self, comment: &Comment) -> Result<()>;
    async fn get_comment(&self, id: &str) -> Result<Option<Comment>>;
    /// Comments of a song, oldest first.
    async fn song_comments(&self, song_id: &str) -> Result<Vec<Comment>>;
    async fn delete_comment(&self, id: &str) -> Result<()>;

    // -- Updates
    async fn put_update(&self, update: &Update) -> Result<()>;
    async fn get_update(&self, id: &str) -> Result<Option<Update>>;
    /// Updates newest first, skipping `start` and taking at most `limit`.
    async fn list_updates(&self, start: usize, limit: Option<usize>) -> Result<Vec<Update>>;
    async fn delete_update(&self, id: &str) -> Result<()>;
}

/// Keeps the first occurrence of every id, preserving order.
pub fn dedup_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
