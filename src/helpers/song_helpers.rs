use crate::{models::song::Song, store::CatalogStore, Error, Result};

pub async fn find_song(store: &dyn CatalogStore, song_id: &str) -> Result<Song> {
    store
        .get_song(song_id)
        .await?
        .ok_or_else(|| Error::SongNotFound {
            id: song_id.to_string(),
        })
}

/// Fails with the first id that has no song behind it.
pub async fn ensure_songs_exist(store: &dyn CatalogStore, song_ids: &[String]) -> Result<()> {
    if song_ids.is_empty() {
        return Ok(());
    }
    let found = store.get_songs(song_ids).await?;
    match song_ids
        .iter()
        .find(|id| !found.iter().any(|song| &song.id == *id))
    {
        Some(missing) => Err(Error::SongNotFound {
            id: missing.clone(),
        }),
        None => Ok(()),
    }
}
