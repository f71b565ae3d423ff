use axum::body::Bytes;

/// An uploaded file, kept in memory until it is handed to the media store.
#[derive(Debug, Clone)]
pub struct Asset {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Asset {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}
