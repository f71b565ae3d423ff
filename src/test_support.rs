//! Fixtures shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::Algorithm;

use crate::{
    auth::token_service::AuthConfig,
    error::{Error, Result},
    models::{album::Album, asset::Asset, song::Song},
    services::{audio_probe::DurationProbe, catalog::Catalog, media_store::MediaStore},
    store::MemoryStore,
};

pub fn sample_song(id: &str, title: &str, duration: u32) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        artwork: format!("memory://artwork/song/{id}.png"),
        release_date: None,
        original: true,
        youtube: None,
        note: None,
        mp3: format!("memory://mp3/{id}.mp3"),
        wav: None,
        flac: None,
        duration,
        lyrics: None,
        features: None,
    }
}

pub fn sample_album(id: &str, title: &str) -> Album {
    Album {
        id: id.to_string(),
        title: title.to_string(),
        artwork: None,
        release_date: None,
        original: true,
        youtube: None,
        ep: false,
        note: None,
    }
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        website_url: "http://localhost:8080".to_string(),
        token_duration_min: 60,
        jwt_algorithm: Algorithm::HS256,
    }
}

/// Keeps uploads in memory and remembers their destinations.
#[derive(Default)]
pub struct RecordingMedia {
    pub uploads: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl MediaStore for RecordingMedia {
    async fn upload(&self, _asset: &Asset, destination: &str) -> Result<String> {
        if self.fail {
            return Err(Error::MediaStoreError("bucket unavailable".to_string()));
        }
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push(destination.to_string());
        }
        Ok(format!("memory://{destination}"))
    }
}

/// Reports one second per byte of the probed asset.
pub struct ByteCountProbe;

impl DurationProbe for ByteCountProbe {
    fn duration_secs(&self, asset: &Asset) -> Result<u32> {
        Ok(asset.bytes.len() as u32)
    }
}

pub struct TestCatalog {
    pub catalog: Catalog,
    pub store: Arc<MemoryStore>,
    pub media: Arc<RecordingMedia>,
}

pub fn test_catalog() -> TestCatalog {
    test_catalog_with_media(RecordingMedia::default())
}

pub fn test_catalog_with_media(media: RecordingMedia) -> TestCatalog {
    let store = Arc::new(MemoryStore::new());
    let media = Arc::new(media);
    let catalog = Catalog::new(store.clone(), media.clone(), Arc::new(ByteCountProbe));
    TestCatalog {
        catalog,
        store,
        media,
    }
}
