use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type Result<T> = core::result::Result<T, Error>;

/// Per-field validation messages, keyed by the request field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Clone, Debug, Serialize, strum_macros::AsRefStr)]
#[serde(tag = "type", content = "data")]
pub enum Error {
    // -- Auth errors.
    Unauthorized,
    AuthFailTokenWrongFormat,
    AuthFailInvalidToken(String),

    // -- Request errors.
    Validation { fields: FieldErrors },
    AudioProbeError(String),

    // -- Model errors.
    SongNotFound { id: String },
    AlbumNotFound { id: String },
    CommentNotFound { id: String },
    UpdateNotFound { id: String },

    // -- Internal errors.
    TrackInvariant { album_id: String, song_id: String },
    DbError(String),
    MediaStoreError(String),
    EnvVarError(String),
    IoError(String),
}

impl Error {
    /// Shorthand for a validation failure on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        Error::Validation { fields }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, client_error) = self.client_status_and_error();

        let response_body = match &self {
            Error::Validation { fields } => serde_json::json!({
                "error": client_error.as_ref(),
                "fields": fields,
            }),
            _ => serde_json::json!({
                "error": client_error.as_ref(),
                "details": self.to_string()
            }),
        };

        (status_code, Json(response_body)).into_response()
    }
}

impl Error {
    pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
        match self {
            Self::Unauthorized | Self::AuthFailTokenWrongFormat | Self::AuthFailInvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, ClientError::NO_AUTH)
            }

            Self::Validation { .. } | Self::AudioProbeError(_) => {
                (StatusCode::BAD_REQUEST, ClientError::INVALID_PARAMS)
            }

            Self::SongNotFound { .. }
            | Self::AlbumNotFound { .. }
            | Self::CommentNotFound { .. }
            | Self::UpdateNotFound { .. } => {
                (StatusCode::NOT_FOUND, ClientError::RESOURCE_NOT_FOUND)
            }

            Self::TrackInvariant { .. }
            | Self::DbError(_)
            | Self::MediaStoreError(_)
            | Self::EnvVarError(_)
            | Self::IoError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::SERVICE_ERROR,
            ),
        }
    }
}

#[derive(Debug, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
    NO_AUTH,
    INVALID_PARAMS,
    SERVICE_ERROR,
    RESOURCE_NOT_FOUND,
}

impl From<surrealdb::Error> for Error {
    fn from(err: surrealdb::Error) -> Self {
        Error::DbError(err.to_string())
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::EnvVarError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::AuthFailInvalidToken(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

impl From<lofty::error::LoftyError> for Error {
    fn from(err: lofty::error::LoftyError) -> Self {
        Error::AudioProbeError(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for Error {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Error::invalid_field("multipart", err.body_text())
    }
}
