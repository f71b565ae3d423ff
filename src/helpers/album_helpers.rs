use crate::{models::album::Album, store::CatalogStore, Error, Result};

pub async fn find_album(store: &dyn CatalogStore, album_id: &str) -> Result<Album> {
    store
        .get_album(album_id)
        .await?
        .ok_or_else(|| Error::AlbumNotFound {
            id: album_id.to_string(),
        })
}

/// Fails with the first id that has no album behind it.
pub async fn ensure_albums_exist(store: &dyn CatalogStore, album_ids: &[String]) -> Result<()> {
    if album_ids.is_empty() {
        return Ok(());
    }
    let found = store.get_albums(album_ids).await?;
    match album_ids
        .iter()
        .find(|id| !found.iter().any(|album| &album.id == *id))
    {
        Some(missing) => Err(Error::AlbumNotFound {
            id: missing.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::MemoryStore, test_support::sample_album};

    #[tokio::test]
    async fn test_album_exists() {
        let store = MemoryStore::new();
        store.put_album(&sample_album("a1", "First")).await.unwrap();

        assert!(find_album(&store, "a1").await.is_ok());
        assert!(matches!(
            find_album(&store, "a2").await,
            Err(Error::AlbumNotFound { .. })
        ));
        assert!(ensure_albums_exist(&store, &[]).await.is_ok());
        assert!(ensure_albums_exist(&store, &["a2".to_string()]).await.is_err());
    }
}
