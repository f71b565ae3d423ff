use crate::{
    error::Result,
    models::album::{CreateAlbumRequest, ModifyAlbumRequest},
    validators::form_validator::{FieldCheck, FormData, MAX_TITLE_LEN},
};

pub struct AlbumValidator;

impl AlbumValidator {
    /// Artwork is optional for albums.
    pub fn create_request(form: &FormData) -> Result<CreateAlbumRequest> {
        let mut check = FieldCheck::new();

        let request = CreateAlbumRequest {
            title: check.required_text(form, "title", MAX_TITLE_LEN),
            release_date: check.optional_date(form, "release_date"),
            original: check.flag(form, "original", true),
            youtube: check.optional_url(form, "youtube"),
            ep: check.flag(form, "ep", false),
            note: check.optional_text(form, "note"),
            songs: check.ids(form, "songs"),
            alternatives: check.ids(form, "alternatives"),
            artwork: check.optional_file(form, "artwork"),
        };

        check.finish()?;
        Ok(request)
    }

    pub fn validate_modify(album_id: &str, request: &ModifyAlbumRequest) -> Result<()> {
        let mut check = FieldCheck::new();

        if let Some(title) = &request.title {
            check.title("title", title, MAX_TITLE_LEN);
        }
        if let Some(youtube) = &request.youtube {
            check.url("youtube", youtube);
        }
        if let Some(alternatives) = &request.alternatives {
            check.not_self("alternatives", album_id, alternatives);
        }

        check.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_album_without_artwork_is_valid() {
        let form = FormData::default()
            .with_text("title", "Singles")
            .with_text("ep", "true")
            .with_text("songs", "s2,s1");

        let request = AlbumValidator::create_request(&form).unwrap();
        assert!(request.ep);
        assert!(request.original);
        assert!(request.artwork.is_none());
        assert_eq!(request.songs, vec!["s2", "s1"]);
    }

    #[test]
    fn test_invalid_album_fields() {
        let form = FormData::default()
            .with_text("title", &"t".repeat(250))
            .with_text("youtube", "ftp://example.com/video");

        let Err(Error::Validation { fields }) = AlbumValidator::create_request(&form) else {
            panic!("expected a validation error");
        };
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("youtube"));
    }

    #[test]
    fn test_album_cannot_be_its_own_alternative() {
        let request = ModifyAlbumRequest {
            alternatives: Some(vec!["a2".into(), "a1".into()]),
            ..Default::default()
        };
        assert!(AlbumValidator::validate_modify("a1", &request).is_err());
        assert!(AlbumValidator::validate_modify("a3", &request).is_ok());
    }
}
