//! Keeps the track numbers of every album dense: for an album with N member
//! songs the numbers are exactly `1..=N`.
//!
//! Planning is pure (`plan_append`, `plan_remove`) and works on a snapshot of
//! the album's tracks. The store applies a plan in one atomic write and the
//! per-album lock makes snapshot, plan and apply a single step.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::OwnedMutexGuard;

use crate::{
    error::{Error, Result},
    models::track::{Track, TrackChange},
    store::CatalogStore,
};

/// Outcome of planning an append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendPlan {
    pub track_number: u32,
    pub changes: Vec<TrackChange>,
}

/// Plans the addition of `song_id` at the end of the album.
///
/// Membership is a set: a song that is already a member keeps its number and
/// the plan is empty.
pub fn plan_append(tracks: &[Track], song_id: &str) -> AppendPlan {
    if let Some(existing) = tracks.iter().find(|track| track.song_id == song_id) {
        return AppendPlan {
            track_number: existing.track_number,
            changes: Vec::new(),
        };
    }

    let track_number = tracks.len() as u32 + 1;
    AppendPlan {
        track_number,
        changes: vec![TrackChange::Insert {
            song_id: song_id.to_string(),
            track_number,
        }],
    }
}

/// Plans the removal of `song_id`, shifting every later track down by one.
pub fn plan_remove(album_id: &str, tracks: &[Track], song_id: &str) -> Result<Vec<TrackChange>> {
    let removed = tracks
        .iter()
        .find(|track| track.song_id == song_id)
        .ok_or_else(|| Error::TrackInvariant {
            album_id: album_id.to_string(),
            song_id: song_id.to_string(),
        })?;

    let mut changes = vec![TrackChange::Delete {
        song_id: song_id.to_string(),
    }];
    changes.extend(
        tracks
            .iter()
            .filter(|track| track.track_number > removed.track_number)
            .map(|track| TrackChange::Renumber {
                song_id: track.song_id.clone(),
                track_number: track.track_number - 1,
            }),
    );

    Ok(changes)
}

/// Registry of one async mutex per key (album or song id).
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyedLocks {
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drops the entry of a deleted record.
    pub fn forget(&self, key: &str) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Applies membership changes one album at a time.
///
/// Lock order is album then song. The song lock is only held around the
/// existence check and the insert, so deleting a song record under its lock
/// either lands before an append (which then fails) or after it (and the
/// caller sees the new track when it cleans up).
pub struct TrackSequencer {
    store: Arc<dyn CatalogStore>,
    albums: KeyedLocks,
    songs: KeyedLocks,
}

impl TrackSequencer {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            albums: KeyedLocks::default(),
            songs: KeyedLocks::default(),
        }
    }

    /// Adds `song_id` to the album and returns its track number.
    pub async fn append(&self, album_id: &str, song_id: &str) -> Result<u32> {
        let _album = self.albums.lock(album_id).await;

        // Either record may have been deleted while we waited for the lock.
        if self.store.get_album(album_id).await?.is_none() {
            return Err(Error::AlbumNotFound {
                id: album_id.to_string(),
            });
        }
        let _song = self.songs.lock(song_id).await;
        if self.store.get_song(song_id).await?.is_none() {
            return Err(Error::SongNotFound {
                id: song_id.to_string(),
            });
        }

        let tracks = self.store.album_tracks(album_id).await?;
        let plan = plan_append(&tracks, song_id);
        if plan.changes.is_empty() {
            tracing::debug!(
                "song {} already on album {} as track {}",
                song_id,
                album_id,
                plan.track_number
            );
            return Ok(plan.track_number);
        }

        self.store.apply_track_changes(album_id, &plan.changes).await?;
        tracing::debug!(
            "appended song {} to album {} as track {}",
            song_id,
            album_id,
            plan.track_number
        );

        Ok(plan.track_number)
    }

    /// Removes `song_id` from the album and closes the gap it leaves.
    ///
    /// Returns `false` when the song is not on the album, including when the
    /// album is gone. Membership is read from the song's side; an album
    /// snapshot that disagrees with it is a `TrackInvariant` fault.
    pub async fn remove_if_member(&self, album_id: &str, song_id: &str) -> Result<bool> {
        let _album = self.albums.lock(album_id).await;

        let is_member = self
            .store
            .song_tracks(song_id)
            .await?
            .iter()
            .any(|track| track.album_id == album_id);
        if !is_member {
            tracing::debug!("song {} is not on album {}", song_id, album_id);
            return Ok(false);
        }

        let tracks = self.store.album_tracks(album_id).await?;
        let changes = plan_remove(album_id, &tracks, song_id).inspect_err(|_| {
            tracing::error!(
                "track invariant broken: no track for song {} on album {}",
                song_id,
                album_id
            );
        })?;

        self.store.apply_track_changes(album_id, &changes).await?;
        tracing::debug!(
            "removed song {} from album {} ({} tracks renumbered)",
            song_id,
            album_id,
            changes.len() - 1
        );

        Ok(true)
    }

    /// Holds the album's lock, e.g. while the album itself is deleted.
    pub async fn lock_album(&self, album_id: &str) -> OwnedMutexGuard<()> {
        self.albums.lock(album_id).await
    }

    /// Holds the song's lock while its record is deleted. Never acquire an
    /// album lock while holding it.
    pub async fn lock_song(&self, song_id: &str) -> OwnedMutexGuard<()> {
        self.songs.lock(song_id).await
    }

    pub fn forget_album(&self, album_id: &str) {
        self.albums.forget(album_id);
    }

    pub fn forget_song(&self, song_id: &str) {
        self.songs.forget(song_id);
    }
}
