use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{Error, Result},
    models::{
        album::Album,
        comment::Comment,
        song::Song,
        track::{edge_key, AlternativeKind, Track, TrackChange},
        update::Update,
    },
    store::CatalogStore,
};

#[derive(Default)]
struct MemoryState {
    songs: HashMap<String, Song>,
    albums: HashMap<String, Album>,
    // album id -> song id -> track number
    tracks: HashMap<String, BTreeMap<String, u32>>,
    alternatives: BTreeSet<(AlternativeKind, String, String)>,
    comments: HashMap<String, Comment>,
    updates: HashMap<String, Update>,
}

/// Catalog kept in process memory, used by tests and `CATALOG_STORE=memory`.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn put_song(&self, song: &Song) -> Result<()> {
        let mut state = self.state.write().await;
        state.songs.insert(song.id.clone(), song.clone());
        Ok(())
    }

    async fn get_song(&self, id: &str) -> Result<Option<Song>> {
        Ok(self.state.read().await.songs.get(id).cloned())
    }

    async fn get_songs(&self, ids: &[String]) -> Result<Vec<Song>> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.songs.get(id).cloned()).collect())
    }

    async fn list_songs(&self) -> Result<Vec<Song>> {
        let mut songs: Vec<Song> = self.state.read().await.songs.values().cloned().collect();
        songs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(songs)
    }

    async fn delete_song(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.songs.remove(id);
        state.comments.retain(|_, comment| comment.song_id != id);
        state
            .alternatives
            .retain(|(kind, a, b)| *kind != AlternativeKind::Song || (a != id && b != id));
        Ok(())
    }

    async fn put_album(&self, album: &Album) -> Result<()> {
        let mut state = self.state.write().await;
        state.albums.insert(album.id.clone(), album.clone());
        Ok(())
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>> {
        Ok(self.state.read().await.albums.get(id).cloned())
    }

    async fn get_albums(&self, ids: &[String]) -> Result<Vec<Album>> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.albums.get(id).cloned()).collect())
    }

    async fn list_albums(&self) -> Result<Vec<Album>> {
        let mut albums: Vec<Album> = self.state.read().await.albums.values().cloned().collect();
        albums.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(albums)
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.albums.remove(id);
        state.tracks.remove(id);
        state
            .alternatives
            .retain(|(kind, a, b)| *kind != AlternativeKind::Album || (a != id && b != id));
        Ok(())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        let state = self.state.read().await;
        let mut tracks: Vec<Track> = state
            .tracks
            .get(album_id)
            .map(|members| {
                members
                    .iter()
                    .map(|(song_id, track_number)| Track {
                        album_id: album_id.to_string(),
                        song_id: song_id.clone(),
                        track_number: *track_number,
                    })
                    .collect()
            })
            .unwrap_or_default();
        tracks.sort_by_key(|track| track.track_number);
        Ok(tracks)
    }

    async fn song_tracks(&self, song_id: &str) -> Result<Vec<Track>> {
        let state = self.state.read().await;
        let mut tracks: Vec<Track> = state
            .tracks
            .iter()
            .filter_map(|(album_id, members)| {
                members.get(song_id).map(|track_number| Track {
                    album_id: album_id.clone(),
                    song_id: song_id.to_string(),
                    track_number: *track_number,
                })
            })
            .collect();
        tracks.sort_by(|a, b| a.album_id.cmp(&b.album_id));
        Ok(tracks)
    }

    async fn apply_track_changes(&self, album_id: &str, changes: &[TrackChange]) -> Result<()> {
        let mut state = self.state.write().await;

        // Work on a copy so a rejected change leaves the album untouched.
        let mut members = state.tracks.get(album_id).cloned().unwrap_or_default();
        for change in changes {
            match change {
                TrackChange::Insert {
                    song_id,
                    track_number,
                } => {
                    if members.insert(song_id.clone(), *track_number).is_some() {
                        return Err(Error::DbError(format!(
                            "track for song '{song_id}' already exists in album '{album_id}'"
                        )));
                    }
                }
                TrackChange::Delete { song_id } => {
                    members.remove(song_id);
                }
                TrackChange::Renumber {
                    song_id,
                    track_number,
                } => {
                    if let Some(number) = members.get_mut(song_id) {
                        *number = *track_number;
                    }
                }
            }
        }

        if members.is_empty() {
            state.tracks.remove(album_id);
        } else {
            state.tracks.insert(album_id.to_string(), members);
        }
        Ok(())
    }

    async fn alternatives(&self, kind: AlternativeKind, id: &str) -> Result<Vec<String>> {
        let state = self.state.read().await;
        Ok(state
            .alternatives
            .iter()
            .filter(|(edge_kind, _, _)| *edge_kind == kind)
            .filter_map(|(_, a, b)| {
                if a == id {
                    Some(b.clone())
                } else if b == id {
                    Some(a.clone())
                } else {
                    None
                }
            })
            .collect())
    }

    async fn replace_alternatives(
        &self,
        kind: AlternativeKind,
        id: &str,
        others: &[String],
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .alternatives
            .retain(|(edge_kind, a, b)| *edge_kind != kind || (a != id && b != id));
        for other in others.iter().filter(|other| other.as_str() != id) {
            let (a, b) = edge_key(id, other);
            state.alternatives.insert((kind, a, b));
        }
        Ok(())
    }

    async fn put_comment(&self, comment: &Comment) -> Result<()> {
        let mut state = self.state.write().await;
        state.comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>> {
        Ok(self.state.read().await.comments.get(id).cloned())
    }

    async fn song_comments(&self, song_id: &str) -> Result<Vec<Comment>> {
        let state = self.state.read().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.song_id == song_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.date);
        Ok(comments)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        self.state.write().await.comments.remove(id);
        Ok(())
    }

    async fn put_update(&self, update: &Update) -> Result<()> {
        let mut state = self.state.write().await;
        state.updates.insert(update.id.clone(), update.clone());
        Ok(())
    }

    async fn get_update(&self, id: &str) -> Result<Option<Update>> {
        Ok(self.state.read().await.updates.get(id).cloned())
    }

    async fn list_updates(&self, start: usize, limit: Option<usize>) -> Result<Vec<Update>> {
        let state = self.state.read().await;
        let mut updates: Vec<Update> = state.updates.values().cloned().collect();
        updates.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(updates
            .into_iter()
            .skip(start)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    async fn delete_update(&self, id: &str) -> Result<()> {
        self.state.write().await.updates.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_album, sample_song};

    #[tokio::test]
    async fn rejected_track_batch_leaves_album_untouched() {
        let store = MemoryStore::new();
        store
            .apply_track_changes(
                "a",
                &[TrackChange::Insert {
                    song_id: "s1".into(),
                    track_number: 1,
                }],
            )
            .await
            .unwrap();

        let result = store
            .apply_track_changes(
                "a",
                &[
                    TrackChange::Insert {
                        song_id: "s2".into(),
                        track_number: 2,
                    },
                    TrackChange::Insert {
                        song_id: "s1".into(),
                        track_number: 3,
                    },
                ],
            )
            .await;

        assert!(result.is_err());
        let tracks = store.album_tracks("a").await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].song_id, "s1");
    }

    #[tokio::test]
    async fn deleting_a_song_cascades_to_comments_and_alternatives() {
        let store = MemoryStore::new();
        let song = sample_song("s1", "One", 100);
        let other = sample_song("s2", "Two", 100);
        store.put_song(&song).await.unwrap();
        store.put_song(&other).await.unwrap();
        store
            .replace_alternatives(AlternativeKind::Song, "s1", &["s2".to_string()])
            .await
            .unwrap();
        store
            .put_comment(&Comment {
                id: "c1".into(),
                song_id: "s1".into(),
                text: "nice".into(),
                nickname: "bob".into(),
                date: chrono::Utc::now(),
            })
            .await
            .unwrap();

        store.delete_song("s1").await.unwrap();

        assert!(store.get_comment("c1").await.unwrap().is_none());
        assert!(store
            .alternatives(AlternativeKind::Song, "s2")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn alternatives_are_symmetric_and_scoped_by_kind() {
        let store = MemoryStore::new();
        store.put_album(&sample_album("a1", "First")).await.unwrap();
        store.put_album(&sample_album("a2", "Second")).await.unwrap();

        store
            .replace_alternatives(AlternativeKind::Album, "a1", &["a2".to_string()])
            .await
            .unwrap();

        assert_eq!(
            store.alternatives(AlternativeKind::Album, "a2").await.unwrap(),
            vec!["a1".to_string()]
        );
        assert!(store
            .alternatives(AlternativeKind::Song, "a2")
            .await
            .unwrap()
            .is_empty());
    }
}
