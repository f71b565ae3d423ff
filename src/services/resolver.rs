//! Read-only projections computed from stored records on every read.

use chrono::{NaiveDate, Utc};

use crate::{
    error::Result,
    models::{
        album::{Album, AlbumSongView, AlbumView},
        song::{Song, SongView},
        track::AlternativeKind,
        update::{Reference, Update, UpdateView},
    },
    store::CatalogStore,
};

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Humanized age of a release. Floor division, no pluralization fix-up.
pub fn released_ago(release_date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - release_date).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n if n < 31 => format!("{} days ago", n),
        n if n < 365 => format!("{} months ago", n / 30),
        n => format!("{} years ago", n / 365),
    }
}

pub fn is_released(release_date: Option<NaiveDate>) -> bool {
    release_date.is_some()
}

pub fn album_duration(songs: &[Song]) -> u32 {
    songs.iter().map(|song| song.duration).sum()
}

pub struct Resolver;

impl Resolver {
    pub async fn song_view(
        store: &dyn CatalogStore,
        song: Song,
        with_comments: bool,
    ) -> Result<SongView> {
        let albums = store
            .song_tracks(&song.id)
            .await?
            .into_iter()
            .map(|track| track.album_id)
            .collect();
        let alternatives = store.alternatives(AlternativeKind::Song, &song.id).await?;
        let comments = if with_comments {
            Some(store.song_comments(&song.id).await?)
        } else {
            None
        };

        Ok(SongView {
            released: is_released(song.release_date),
            released_ago: song.release_date.map(|date| released_ago(date, today())),
            albums,
            alternatives,
            comments,
            song,
        })
    }

    pub async fn album_view(store: &dyn CatalogStore, album: Album) -> Result<AlbumView> {
        let tracks = store.album_tracks(&album.id).await?;
        let song_ids: Vec<String> = tracks.iter().map(|track| track.song_id.clone()).collect();
        let songs = store.get_songs(&song_ids).await?;

        let duration = album_duration(&songs);
        let number_of_songs = tracks.len();

        let mut members = Vec::with_capacity(songs.len());
        for track in &tracks {
            let Some(song) = songs.iter().find(|song| song.id == track.song_id) else {
                tracing::warn!(
                    "album {} has a track for missing song {}",
                    album.id,
                    track.song_id
                );
                continue;
            };
            members.push(AlbumSongView {
                track_number: track.track_number,
                song: Self::song_view(store, song.clone(), false).await?,
            });
        }

        let alternatives = store.alternatives(AlternativeKind::Album, &album.id).await?;

        Ok(AlbumView {
            released: is_released(album.release_date),
            released_ago: album.release_date.map(|date| released_ago(date, today())),
            duration,
            number_of_songs,
            alternatives,
            songs: members,
            album,
        })
    }

    /// Expands the references of an update, dropping the dangling ones.
    pub async fn update_view(store: &dyn CatalogStore, update: Update) -> Result<UpdateView> {
        let references_songs = store
            .get_songs(&update.song_ids)
            .await?
            .into_iter()
            .map(|song| Reference {
                id: song.id,
                title: song.title,
            })
            .collect();
        let references_albums = store
            .get_albums(&update.album_ids)
            .await?
            .into_iter()
            .map(|album| Reference {
                id: album.id,
                title: album.title,
            })
            .collect();

        Ok(UpdateView {
            id: update.id,
            title: update.title,
            content: update.content,
            date: update.date,
            references_songs,
            references_albums,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::{
        models::track::TrackChange,
        store::MemoryStore,
        test_support::{sample_album, sample_song},
    };

    fn ago(days: i64) -> String {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        released_ago(today - Duration::days(days), today)
    }

    #[test]
    fn test_released_ago_labels() {
        assert_eq!(ago(0), "Today");
        assert_eq!(ago(1), "Yesterday");
        assert_eq!(ago(10), "10 days ago");
        assert_eq!(ago(30), "30 days ago");
        assert_eq!(ago(31), "1 months ago");
        assert_eq!(ago(60), "2 months ago");
        assert_eq!(ago(364), "12 months ago");
        assert_eq!(ago(365), "1 years ago");
        assert_eq!(ago(400), "1 years ago");
        assert_eq!(ago(800), "2 years ago");
    }

    #[test]
    fn test_future_dates_fall_into_days_branch() {
        assert_eq!(ago(-3), "-3 days ago");
    }

    #[test]
    fn test_duration_is_the_sum() {
        assert_eq!(album_duration(&[]), 0);
        let songs = vec![sample_song("s1", "One", 180), sample_song("s2", "Two", 200)];
        assert_eq!(album_duration(&songs), 380);
    }

    #[test]
    fn test_released_flag() {
        assert!(is_released(NaiveDate::from_ymd_opt(2020, 1, 1)));
        assert!(!is_released(None));
    }

    #[tokio::test]
    async fn test_album_view_lists_songs_by_track_number() {
        let store = MemoryStore::new();
        store.put_album(&sample_album("a", "Album")).await.unwrap();
        store.put_song(&sample_song("s1", "Zulu", 180)).await.unwrap();
        store.put_song(&sample_song("s2", "Alpha", 200)).await.unwrap();
        store
            .apply_track_changes(
                "a",
                &[
                    TrackChange::Insert {
                        song_id: "s1".into(),
                        track_number: 1,
                    },
                    TrackChange::Insert {
                        song_id: "s2".into(),
                        track_number: 2,
                    },
                ],
            )
            .await
            .unwrap();

        let album = store.get_album("a").await.unwrap().unwrap();
        let view = Resolver::album_view(&store, album).await.unwrap();

        assert_eq!(view.duration, 380);
        assert_eq!(view.number_of_songs, 2);
        let order: Vec<(&str, u32)> = view
            .songs
            .iter()
            .map(|member| (member.song.song.id.as_str(), member.track_number))
            .collect();
        assert_eq!(order, vec![("s1", 1), ("s2", 2)]);
        assert_eq!(view.songs[0].song.albums, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_update_view_drops_dangling_references() {
        let store = MemoryStore::new();
        store.put_song(&sample_song("s1", "One", 100)).await.unwrap();

        let update = Update {
            id: "u1".into(),
            title: "News".into(),
            content: "Body".into(),
            date: Utc::now(),
            song_ids: vec!["s1".into(), "gone".into()],
            album_ids: vec!["gone".into()],
        };
        let view = Resolver::update_view(&store, update).await.unwrap();

        assert_eq!(
            view.references_songs,
            vec![Reference {
                id: "s1".into(),
                title: "One".into()
            }]
        );
        assert!(view.references_albums.is_empty());
    }
}
