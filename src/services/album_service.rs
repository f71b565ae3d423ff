use uuid::Uuid;

use crate::{
    error::Result,
    helpers::{
        album_helpers::{ensure_albums_exist, find_album},
        song_helpers::{ensure_songs_exist, find_song},
    },
    middlewares::mw_auth::Ctx,
    models::{
        album::{Album, AlbumView, CreateAlbumRequest, ModifyAlbumRequest},
        track::AlternativeKind,
    },
    services::{catalog::Catalog, media_store::MediaPath, resolver::Resolver},
    store::dedup_ids,
};

pub struct AlbumService;

impl AlbumService {
    pub async fn get_albums(catalog: &Catalog) -> Result<Vec<AlbumView>> {
        let albums = catalog.store.list_albums().await?;

        let mut views = Vec::with_capacity(albums.len());
        for album in albums {
            views.push(Resolver::album_view(catalog.store.as_ref(), album).await?);
        }
        Ok(views)
    }

    pub async fn get_album(catalog: &Catalog, album_id: &str) -> Result<AlbumView> {
        let album = find_album(catalog.store.as_ref(), album_id).await?;
        Resolver::album_view(catalog.store.as_ref(), album).await
    }

    pub async fn create_album(
        catalog: &Catalog,
        ctx: &Ctx,
        request: CreateAlbumRequest,
    ) -> Result<AlbumView> {
        ctx.require_superuser()?;

        let songs = dedup_ids(&request.songs);
        let alternatives = dedup_ids(&request.alternatives);
        ensure_songs_exist(catalog.store.as_ref(), &songs).await?;
        ensure_albums_exist(catalog.store.as_ref(), &alternatives).await?;

        let artwork = match &request.artwork {
            Some(asset) => Some(
                catalog
                    .media
                    .upload(asset, &MediaPath::album_artwork(&asset.file_name))
                    .await?,
            ),
            None => None,
        };

        let album = Album {
            id: Uuid::new_v4().simple().to_string(),
            title: request.title,
            artwork,
            release_date: request.release_date,
            original: request.original,
            youtube: request.youtube,
            ep: request.ep,
            note: request.note,
        };
        catalog.store.put_album(&album).await?;
        catalog
            .store
            .replace_alternatives(AlternativeKind::Album, &album.id, &alternatives)
            .await?;
        for song_id in &songs {
            catalog.sequencer.append(&album.id, song_id).await?;
        }

        tracing::info!("created album {} ({})", album.id, album.title);

        Self::get_album(catalog, &album.id).await
    }

    pub async fn modify_album(
        catalog: &Catalog,
        ctx: &Ctx,
        album_id: &str,
        request: ModifyAlbumRequest,
    ) -> Result<AlbumView> {
        ctx.require_superuser()?;

        let mut album = find_album(catalog.store.as_ref(), album_id).await?;
        let alternatives = request.alternatives.as_ref().map(dedup_ids);
        if let Some(alternatives) = &alternatives {
            ensure_albums_exist(catalog.store.as_ref(), alternatives).await?;
        }

        if let Some(title) = request.title {
            album.title = title;
        }
        if let Some(release_date) = request.release_date {
            album.release_date = Some(release_date);
        }
        if let Some(original) = request.original {
            album.original = original;
        }
        if let Some(youtube) = request.youtube {
            album.youtube = Some(youtube);
        }
        if let Some(ep) = request.ep {
            album.ep = ep;
        }
        if let Some(note) = request.note {
            album.note = Some(note);
        }

        catalog.store.put_album(&album).await?;
        if let Some(alternatives) = alternatives {
            catalog
                .store
                .replace_alternatives(AlternativeKind::Album, album_id, &alternatives)
                .await?;
        }

        Self::get_album(catalog, album_id).await
    }

    pub async fn delete_album(catalog: &Catalog, ctx: &Ctx, album_id: &str) -> Result<()> {
        ctx.require_superuser()?;

        find_album(catalog.store.as_ref(), album_id).await?;
        {
            let _guard = catalog.sequencer.lock_album(album_id).await;
            catalog.store.delete_album(album_id).await?;
        }
        catalog.sequencer.forget_album(album_id);

        tracing::info!("deleted album {}", album_id);
        Ok(())
    }

    /// Adds a song at the end of the album and returns its track number.
    pub async fn attach_song(
        catalog: &Catalog,
        ctx: &Ctx,
        album_id: &str,
        song_id: &str,
    ) -> Result<u32> {
        ctx.require_superuser()?;

        find_album(catalog.store.as_ref(), album_id).await?;
        find_song(catalog.store.as_ref(), song_id).await?;

        catalog.sequencer.append(album_id, song_id).await
    }

    /// Takes a song off the album. Detaching a song that is not a member does
    /// nothing.
    pub async fn detach_song(
        catalog: &Catalog,
        ctx: &Ctx,
        album_id: &str,
        song_id: &str,
    ) -> Result<()> {
        ctx.require_superuser()?;

        find_album(catalog.store.as_ref(), album_id).await?;
        find_song(catalog.store.as_ref(), song_id).await?;

        catalog.sequencer.remove_if_member(album_id, song_id).await?;
        Ok(())
    }
}
