use std::path::PathBuf;

use async_trait::async_trait;
use lazy_regex::regex;
use uuid::Uuid;

use crate::{error::Error, models::asset::Asset, Result};

/// Where uploaded assets end up. Returns the public URL of the stored file.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, asset: &Asset, destination: &str) -> Result<String>;
}

/// Replaces anything outside `[A-Za-z0-9._-]` so a client-supplied name can
/// never leave its directory.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned = regex!(r"[^A-Za-z0-9._-]").replace_all(name, "_");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Destination paths. Every name gets a fresh uuid prefix so two uploads
/// with the same file name never share a file.
pub struct MediaPath;

impl MediaPath {
    fn unique(dir: &str, name: &str) -> String {
        format!("{dir}/{}_{}", Uuid::new_v4().simple(), sanitize_file_name(name))
    }

    pub fn song_artwork(name: &str) -> String {
        Self::unique("artwork/song", name)
    }

    pub fn album_artwork(name: &str) -> String {
        Self::unique("artwork/album", name)
    }

    pub fn mp3(name: &str) -> String {
        Self::unique("mp3", name)
    }

    pub fn wav(name: &str) -> String {
        Self::unique("wav", name)
    }

    pub fn flac(name: &str) -> String {
        Self::unique("flac", name)
    }
}

/// Writes assets below a local directory that is served under `public_url`.
pub struct LocalMediaStore {
    root: PathBuf,
    public_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, asset: &Asset, destination: &str) -> Result<String> {
        let path = self.root.join(destination);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::MediaStoreError(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, &asset.bytes)
            .await
            .map_err(|e| Error::MediaStoreError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("stored {} ({} bytes)", destination, asset.bytes.len());

        Ok(format!("{}/{}", self.public_url, destination))
    }
}
