use async_trait::async_trait;
use serde::Deserialize;
use surrealdb::{
    engine::any::{self, Any},
    opt::auth::Root,
    Surreal,
};

use crate::{
    config::DatabaseConfig,
    error::Result,
    models::{
        album::Album,
        comment::Comment,
        song::Song,
        track::{edge_key, AlternativeKind, Track, TrackChange},
        update::Update,
    },
    store::{dedup_ids, CatalogStore},
};

const SONG_FIELDS: &str = "record::id(id) AS id, title, artwork, release_date, original, \
    youtube, note, mp3, wav, flac, duration, lyrics, features";

const SONG_SET: &str = "title = $title, artwork = $artwork, release_date = $release_date, \
    original = $original, youtube = $youtube, note = $note, mp3 = $mp3, wav = $wav, \
    flac = $flac, duration = $duration, lyrics = $lyrics, features = $features";

const ALBUM_FIELDS: &str =
    "record::id(id) AS id, title, artwork, release_date, original, youtube, ep, note";

const ALBUM_SET: &str = "title = $title, artwork = $artwork, release_date = $release_date, \
    original = $original, youtube = $youtube, ep = $ep, note = $note";

const COMMENT_FIELDS: &str = "record::id(id) AS id, song_id, text, nickname, date, stamp";

const UPDATE_FIELDS: &str =
    "record::id(id) AS id, title, content, date, song_ids, album_ids, stamp";

#[derive(Deserialize)]
struct AlternativeEdge {
    a: String,
    b: String,
}

/// Catalog persisted in SurrealDB.
///
/// Records are keyed by their string id (`song:<id>`); tracks and alternative
/// edges use array keys so a pair can only be stored once.
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
}

impl SurrealStore {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!("Connecting to database at: {}", config.url);

        let db = any::connect(&config.url).await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root { username, password }).await?;
        }

        tracing::info!("Database connected successfully!");

        Ok(Self::new(db))
    }
}

/// Position of `id` in the caller's list, used to restore request order.
fn request_position(ids: &[String], id: &str) -> usize {
    ids.iter().position(|candidate| candidate == id).unwrap_or(usize::MAX)
}

#[async_trait]
impl CatalogStore for SurrealStore {
    async fn put_song(&self, song: &Song) -> Result<()> {
        let sql = format!("UPSERT type::thing('song', $id) SET {SONG_SET};");
        self.db.query(sql).bind(song.clone()).await?.check()?;
        Ok(())
    }

    async fn get_song(&self, id: &str) -> Result<Option<Song>> {
        let sql = format!("SELECT {SONG_FIELDS} FROM type::thing('song', $id);");
        let mut response = self.db.query(sql).bind(("id", id.to_string())).await?;
        let song: Option<Song> = response.take(0)?;
        Ok(song)
    }

    async fn get_songs(&self, ids: &[String]) -> Result<Vec<Song>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT {SONG_FIELDS} FROM song WHERE record::id(id) IN $ids;");
        let mut response = self.db.query(sql).bind(("ids", ids.to_vec())).await?;
        let mut songs: Vec<Song> = response.take(0)?;
        songs.sort_by_key(|song| request_position(ids, &song.id));
        Ok(songs)
    }

    async fn list_songs(&self) -> Result<Vec<Song>> {
        let sql = format!("SELECT {SONG_FIELDS} FROM song ORDER BY title ASC;");
        let mut response = self.db.query(sql).await?;
        let songs: Vec<Song> = response.take(0)?;
        Ok(songs)
    }

    async fn delete_song(&self, id: &str) -> Result<()> {
        let sql = "
        BEGIN TRANSACTION;
        DELETE type::thing('song', $id);
        DELETE comment WHERE song_id = $id;
        DELETE song_alternative WHERE a = $id OR b = $id;
        COMMIT TRANSACTION;
    ";
        self.db
            .query(sql)
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    async fn put_album(&self, album: &Album) -> Result<()> {
        let sql = format!("UPSERT type::thing('album', $id) SET {ALBUM_SET};");
        self.db.query(sql).bind(album.clone()).await?.check()?;
        Ok(())
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>> {
        let sql = format!("SELECT {ALBUM_FIELDS} FROM type::thing('album', $id);");
        let mut response = self.db.query(sql).bind(("id", id.to_string())).await?;
        let album: Option<Album> = response.take(0)?;
        Ok(album)
    }

    async fn get_albums(&self, ids: &[String]) -> Result<Vec<Album>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT {ALBUM_FIELDS} FROM album WHERE record::id(id) IN $ids;");
        let mut response = self.db.query(sql).bind(("ids", ids.to_vec())).await?;
        let mut albums: Vec<Album> = response.take(0)?;
        albums.sort_by_key(|album| request_position(ids, &album.id));
        Ok(albums)
    }

    async fn list_albums(&self) -> Result<Vec<Album>> {
        let sql = format!("SELECT {ALBUM_FIELDS} FROM album ORDER BY title ASC;");
        let mut response = self.db.query(sql).await?;
        let albums: Vec<Album> = response.take(0)?;
        Ok(albums)
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        let sql = "
        BEGIN TRANSACTION;
        DELETE type::thing('album', $id);
        DELETE track WHERE album_id = $id;
        DELETE album_alternative WHERE a = $id OR b = $id;
        COMMIT TRANSACTION;
    ";
        self.db
            .query(sql)
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        let sql = "
        SELECT album_id, song_id, track_number
        FROM track
        WHERE album_id = $album_id
        ORDER BY track_number ASC;
    ";
        let mut response = self
            .db
            .query(sql)
            .bind(("album_id", album_id.to_string()))
            .await?;
        let tracks: Vec<Track> = response.take(0)?;
        Ok(tracks)
    }

    async fn song_tracks(&self, song_id: &str) -> Result<Vec<Track>> {
        let sql = "
        SELECT album_id, song_id, track_number
        FROM track
        WHERE song_id = $song_id
        ORDER BY album_id ASC;
    ";
        let mut response = self
            .db
            .query(sql)
            .bind(("song_id", song_id.to_string()))
            .await?;
        let tracks: Vec<Track> = response.take(0)?;
        Ok(tracks)
    }

    async fn apply_track_changes(&self, album_id: &str, changes: &[TrackChange]) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for (i, change) in changes.iter().enumerate() {
            let statement = match change {
                TrackChange::Insert { .. } => format!(
                    "CREATE type::thing('track', [$album_id, $song_{i}]) \
                     SET album_id = $album_id, song_id = $song_{i}, track_number = $number_{i};\n"
                ),
                TrackChange::Delete { .. } => {
                    format!("DELETE type::thing('track', [$album_id, $song_{i}]);\n")
                }
                TrackChange::Renumber { .. } => format!(
                    "UPDATE type::thing('track', [$album_id, $song_{i}]) \
                     SET track_number = $number_{i};\n"
                ),
            };
            sql.push_str(&statement);
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self
            .db
            .query(sql)
            .bind(("album_id", album_id.to_string()));
        for (i, change) in changes.iter().enumerate() {
            match change {
                TrackChange::Insert {
                    song_id,
                    track_number,
                }
                | TrackChange::Renumber {
                    song_id,
                    track_number,
                } => {
                    query = query
                        .bind((format!("song_{i}"), song_id.clone()))
                        .bind((format!("number_{i}"), *track_number));
                }
                TrackChange::Delete { song_id } => {
                    query = query.bind((format!("song_{i}"), song_id.clone()));
                }
            }
        }

        query.await?.check()?;
        Ok(())
    }

    async fn alternatives(&self, kind: AlternativeKind, id: &str) -> Result<Vec<String>> {
        let sql = format!("SELECT a, b FROM {} WHERE a = $id OR b = $id;", kind.table());
        let mut response = self.db.query(sql).bind(("id", id.to_string())).await?;
        let edges: Vec<AlternativeEdge> = response.take(0)?;

        let mut others: Vec<String> = edges
            .into_iter()
            .map(|edge| if edge.a == id { edge.b } else { edge.a })
            .collect();
        others.sort();
        Ok(others)
    }

    async fn replace_alternatives(
        &self,
        kind: AlternativeKind,
        id: &str,
        others: &[String],
    ) -> Result<()> {
        let table = kind.table();
        let edges: Vec<(String, String)> = dedup_ids(others.iter().filter(|other| *other != id))
            .iter()
            .map(|other| edge_key(id, other))
            .collect();

        let mut sql = format!("BEGIN TRANSACTION;\nDELETE {table} WHERE a = $id OR b = $id;\n");
        for i in 0..edges.len() {
            sql.push_str(&format!(
                "CREATE type::thing('{table}', [$a_{i}, $b_{i}]) SET a = $a_{i}, b = $b_{i};\n"
            ));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self.db.query(sql).bind(("id", id.to_string()));
        for (i, (a, b)) in edges.into_iter().enumerate() {
            query = query.bind((format!("a_{i}"), a)).bind((format!("b_{i}"), b));
        }

        query.await?.check()?;
        Ok(())
    }

    async fn put_comment(&self, comment: &Comment) -> Result<()> {
        let sql = "
        UPSERT type::thing('comment', $id) SET
            song_id = $song_id,
            text = $text,
            nickname = $nickname,
            date = $date,
            stamp = $stamp;
    ";
        self.db
            .query(sql)
            .bind(comment.clone())
            .bind(("stamp", comment.date.timestamp_micros()))
            .await?
            .check()?;
        Ok(())
    }

    async fn get_comment(&self, id: &str) -> Result<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_FIELDS} FROM type::thing('comment', $id);");
        let mut response = self.db.query(sql).bind(("id", id.to_string())).await?;
        let comment: Option<Comment> = response.take(0)?;
        Ok(comment)
    }

    async fn song_comments(&self, song_id: &str) -> Result<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_FIELDS} FROM comment WHERE song_id = $song_id ORDER BY stamp ASC;"
        );
        let mut response = self
            .db
            .query(sql)
            .bind(("song_id", song_id.to_string()))
            .await?;
        let comments: Vec<Comment> = response.take(0)?;
        Ok(comments)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        self.db
            .query("DELETE type::thing('comment', $id);")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    async fn put_update(&self, update: &Update) -> Result<()> {
        let sql = "
        UPSERT type::thing('news_update', $id) SET
            title = $title,
            content = $content,
            date = $date,
            song_ids = $song_ids,
            album_ids = $album_ids,
            stamp = $stamp;
    ";
        self.db
            .query(sql)
            .bind(update.clone())
            .bind(("stamp", update.date.timestamp_micros()))
            .await?
            .check()?;
        Ok(())
    }

    async fn get_update(&self, id: &str) -> Result<Option<Update>> {
        let sql = format!("SELECT {UPDATE_FIELDS} FROM type::thing('news_update', $id);");
        let mut response = self.db.query(sql).bind(("id", id.to_string())).await?;
        let update: Option<Update> = response.take(0)?;
        Ok(update)
    }

    async fn list_updates(&self, start: usize, limit: Option<usize>) -> Result<Vec<Update>> {
        let mut sql = format!("SELECT {UPDATE_FIELDS} FROM news_update ORDER BY stamp DESC");
        match limit {
            Some(0) => return Ok(vec![]),
            Some(limit) => sql.push_str(&format!(" LIMIT {limit}")),
            None => {}
        }
        if start > 0 {
            sql.push_str(&format!(" START {start}"));
        }
        sql.push(';');

        let mut response = self.db.query(sql).await?;
        let updates: Vec<Update> = response.take(0)?;
        Ok(updates)
    }

    async fn delete_update(&self, id: &str) -> Result<()> {
        self.db
            .query("DELETE type::thing('news_update', $id);")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_album, sample_song};
    use chrono::{Duration, NaiveDate, Utc};

    async fn setup_db() -> SurrealStore {
        let db = any::connect("mem://").await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        SurrealStore::new(db)
    }

    #[tokio::test]
    async fn test_song_round_trip() {
        let store = setup_db().await;
        let mut song = sample_song("s1", "Intro", 180);
        song.release_date = NaiveDate::from_ymd_opt(2023, 5, 1);
        song.flac = Some("https://cdn.example.com/flac/intro.flac".to_string());

        store.put_song(&song).await.unwrap();

        let fetched = store.get_song("s1").await.unwrap();
        assert_eq!(fetched, Some(song));
        assert!(store.get_song("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_songs_listed_by_title() {
        let store = setup_db().await;
        store.put_song(&sample_song("s1", "Zulu", 1)).await.unwrap();
        store.put_song(&sample_song("s2", "Alpha", 1)).await.unwrap();

        let titles: Vec<String> = store
            .list_songs()
            .await
            .unwrap()
            .into_iter()
            .map(|song| song.title)
            .collect();
        assert_eq!(titles, vec!["Alpha".to_string(), "Zulu".to_string()]);

        let picked = store
            .get_songs(&["s1".to_string(), "s2".to_string()])
            .await
            .unwrap();
        assert_eq!(picked[0].id, "s1");
        assert_eq!(picked[1].id, "s2");
    }

    #[tokio::test]
    async fn test_track_changes_apply_atomically() {
        let store = setup_db().await;
        store
            .apply_track_changes(
                "a1",
                &[
                    TrackChange::Insert {
                        song_id: "s1".into(),
                        track_number: 1,
                    },
                    TrackChange::Insert {
                        song_id: "s2".into(),
                        track_number: 2,
                    },
                    TrackChange::Insert {
                        song_id: "s3".into(),
                        track_number: 3,
                    },
                ],
            )
            .await
            .unwrap();

        store
            .apply_track_changes(
                "a1",
                &[
                    TrackChange::Delete {
                        song_id: "s1".into(),
                    },
                    TrackChange::Renumber {
                        song_id: "s2".into(),
                        track_number: 1,
                    },
                    TrackChange::Renumber {
                        song_id: "s3".into(),
                        track_number: 2,
                    },
                ],
            )
            .await
            .unwrap();

        let tracks = store.album_tracks("a1").await.unwrap();
        let numbered: Vec<(String, u32)> = tracks
            .into_iter()
            .map(|track| (track.song_id, track.track_number))
            .collect();
        assert_eq!(
            numbered,
            vec![("s2".to_string(), 1), ("s3".to_string(), 2)]
        );

        // A duplicate insert aborts the whole batch.
        let result = store
            .apply_track_changes(
                "a1",
                &[
                    TrackChange::Renumber {
                        song_id: "s3".into(),
                        track_number: 7,
                    },
                    TrackChange::Insert {
                        song_id: "s2".into(),
                        track_number: 3,
                    },
                ],
            )
            .await;
        assert!(result.is_err());
        let tracks = store.album_tracks("a1").await.unwrap();
        assert_eq!(tracks[1].track_number, 2);

        let song_tracks = store.song_tracks("s3").await.unwrap();
        assert_eq!(song_tracks.len(), 1);
        assert_eq!(song_tracks[0].album_id, "a1");
    }

    #[tokio::test]
    async fn test_album_delete_drops_tracks() {
        let store = setup_db().await;
        store.put_album(&sample_album("a1", "Debut")).await.unwrap();
        store
            .apply_track_changes(
                "a1",
                &[TrackChange::Insert {
                    song_id: "s1".into(),
                    track_number: 1,
                }],
            )
            .await
            .unwrap();

        store.delete_album("a1").await.unwrap();

        assert!(store.get_album("a1").await.unwrap().is_none());
        assert!(store.album_tracks("a1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_alternatives_are_symmetric() {
        let store = setup_db().await;
        store
            .replace_alternatives(
                AlternativeKind::Song,
                "s2",
                &["s1".to_string(), "s3".to_string(), "s1".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(
            store.alternatives(AlternativeKind::Song, "s2").await.unwrap(),
            vec!["s1".to_string(), "s3".to_string()]
        );
        assert_eq!(
            store.alternatives(AlternativeKind::Song, "s1").await.unwrap(),
            vec!["s2".to_string()]
        );

        store
            .replace_alternatives(AlternativeKind::Song, "s1", &[])
            .await
            .unwrap();
        assert_eq!(
            store.alternatives(AlternativeKind::Song, "s2").await.unwrap(),
            vec!["s3".to_string()]
        );
    }

    #[tokio::test]
    async fn test_updates_newest_first() {
        let store = setup_db().await;
        let now = Utc::now();
        for (i, title) in ["old", "middle", "new"].iter().enumerate() {
            store
                .put_update(&Update {
                    id: format!("u{i}"),
                    title: title.to_string(),
                    content: String::new(),
                    date: now + Duration::seconds(i as i64),
                    song_ids: vec![],
                    album_ids: vec![],
                })
                .await
                .unwrap();
        }

        let titles = |updates: Vec<Update>| -> Vec<String> {
            updates.into_iter().map(|update| update.title).collect()
        };

        assert_eq!(
            titles(store.list_updates(0, None).await.unwrap()),
            vec!["new", "middle", "old"]
        );
        assert_eq!(
            titles(store.list_updates(1, Some(1)).await.unwrap()),
            vec!["middle"]
        );
    }

    #[tokio::test]
    async fn test_song_delete_cascades_comments() {
        let store = setup_db().await;
        store.put_song(&sample_song("s1", "One", 10)).await.unwrap();
        store
            .put_comment(&Comment {
                id: "c1".into(),
                song_id: "s1".into(),
                text: "great".into(),
                nickname: "ann".into(),
                date: Utc::now(),
            })
            .await
            .unwrap();
        assert_eq!(store.song_comments("s1").await.unwrap().len(), 1);

        store.delete_song("s1").await.unwrap();

        assert!(store.get_song("s1").await.unwrap().is_none());
        assert!(store.get_comment("c1").await.unwrap().is_none());
    }
}
