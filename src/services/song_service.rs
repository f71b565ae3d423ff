use uuid::Uuid;

use crate::{
    error::Result,
    helpers::{
        album_helpers::ensure_albums_exist,
        song_helpers::{ensure_songs_exist, find_song},
    },
    middlewares::mw_auth::Ctx,
    models::{
        song::{CreateSongRequest, ModifySongRequest, Song, SongView},
        track::AlternativeKind,
    },
    services::{
        audio_probe::lossless_duration, catalog::Catalog, media_store::MediaPath,
        resolver::Resolver,
    },
    store::dedup_ids,
};

pub struct SongService;

impl SongService {
    pub async fn get_songs(catalog: &Catalog) -> Result<Vec<SongView>> {
        let songs = catalog.store.list_songs().await?;

        let mut views = Vec::with_capacity(songs.len());
        for song in songs {
            views.push(Resolver::song_view(catalog.store.as_ref(), song, false).await?);
        }
        Ok(views)
    }

    /// A single song, with its comments.
    pub async fn get_song(catalog: &Catalog, song_id: &str) -> Result<SongView> {
        let song = find_song(catalog.store.as_ref(), song_id).await?;
        Resolver::song_view(catalog.store.as_ref(), song, true).await
    }

    pub async fn create_song(
        catalog: &Catalog,
        ctx: &Ctx,
        request: CreateSongRequest,
    ) -> Result<SongView> {
        ctx.require_superuser()?;

        let albums = dedup_ids(&request.albums);
        let alternatives = dedup_ids(&request.alternatives);
        ensure_albums_exist(catalog.store.as_ref(), &albums).await?;
        ensure_songs_exist(catalog.store.as_ref(), &alternatives).await?;

        let duration = lossless_duration(
            catalog.probe.as_ref(),
            request.wav.as_ref(),
            request.flac.as_ref(),
        )?;

        let media = catalog.media.as_ref();
        let artwork = media
            .upload(&request.artwork, &MediaPath::song_artwork(&request.artwork.file_name))
            .await?;
        let mp3 = media
            .upload(&request.mp3, &MediaPath::mp3(&request.mp3.file_name))
            .await?;
        let wav = match &request.wav {
            Some(asset) => Some(media.upload(asset, &MediaPath::wav(&asset.file_name)).await?),
            None => None,
        };
        let flac = match &request.flac {
            Some(asset) => Some(media.upload(asset, &MediaPath::flac(&asset.file_name)).await?),
            None => None,
        };

        let song = Song {
            id: Uuid::new_v4().simple().to_string(),
            title: request.title,
            artwork,
            release_date: request.release_date,
            original: request.original,
            youtube: request.youtube,
            note: request.note,
            mp3,
            wav,
            flac,
            duration,
            lyrics: request.lyrics,
            features: request.features,
        };
        catalog.store.put_song(&song).await?;
        catalog
            .store
            .replace_alternatives(AlternativeKind::Song, &song.id, &alternatives)
            .await?;
        for album_id in &albums {
            catalog.sequencer.append(album_id, &song.id).await?;
        }

        tracing::info!("created song {} ({}, {}s)", song.id, song.title, song.duration);

        Self::get_song(catalog, &song.id).await
    }

    /// Partial update. A supplied `albums` list replaces the memberships: the
    /// albums that are no longer listed lose the song, the new ones get it
    /// appended, the others keep its position.
    pub async fn modify_song(
        catalog: &Catalog,
        ctx: &Ctx,
        song_id: &str,
        request: ModifySongRequest,
    ) -> Result<SongView> {
        ctx.require_superuser()?;

        let mut song = find_song(catalog.store.as_ref(), song_id).await?;
        let albums = request.albums.as_ref().map(dedup_ids);
        let alternatives = request.alternatives.as_ref().map(dedup_ids);
        if let Some(albums) = &albums {
            ensure_albums_exist(catalog.store.as_ref(), albums).await?;
        }
        if let Some(alternatives) = &alternatives {
            ensure_songs_exist(catalog.store.as_ref(), alternatives).await?;
        }

        if let Some(title) = request.title {
            song.title = title;
        }
        if let Some(release_date) = request.release_date {
            song.release_date = Some(release_date);
        }
        if let Some(original) = request.original {
            song.original = original;
        }
        if let Some(youtube) = request.youtube {
            song.youtube = Some(youtube);
        }
        if let Some(note) = request.note {
            song.note = Some(note);
        }
        if let Some(lyrics) = request.lyrics {
            song.lyrics = Some(lyrics);
        }
        if let Some(features) = request.features {
            song.features = Some(features);
        }

        catalog.store.put_song(&song).await?;
        if let Some(alternatives) = alternatives {
            catalog
                .store
                .replace_alternatives(AlternativeKind::Song, song_id, &alternatives)
                .await?;
        }
        if let Some(albums) = albums {
            Self::replace_albums(catalog, song_id, &albums).await?;
        }

        Self::get_song(catalog, song_id).await
    }

    async fn replace_albums(catalog: &Catalog, song_id: &str, albums: &[String]) -> Result<()> {
        let current: Vec<String> = catalog
            .store
            .song_tracks(song_id)
            .await?
            .into_iter()
            .map(|track| track.album_id)
            .collect();

        for album_id in current.iter().filter(|id| !albums.contains(id)) {
            catalog.sequencer.remove_if_member(album_id, song_id).await?;
        }
        for album_id in albums.iter().filter(|id| !current.contains(id)) {
            catalog.sequencer.append(album_id, song_id).await?;
        }
        Ok(())
    }

    /// Deletes the song with its comments and alternative links, then takes it
    /// off every album it was on.
    pub async fn delete_song(catalog: &Catalog, ctx: &Ctx, song_id: &str) -> Result<()> {
        ctx.require_superuser()?;

        find_song(catalog.store.as_ref(), song_id).await?;
        {
            let _guard = catalog.sequencer.lock_song(song_id).await;
            catalog.store.delete_song(song_id).await?;
        }

        // No append can land once the record is gone.
        for track in catalog.store.song_tracks(song_id).await? {
            catalog
                .sequencer
                .remove_if_member(&track.album_id, song_id)
                .await?;
        }
        catalog.sequencer.forget_song(song_id);

        tracing::info!("deleted song {}", song_id);
        Ok(())
    }
}
