use crate::{
    error::{Error, Result},
    models::song::{CreateSongRequest, ModifySongRequest},
    validators::form_validator::{FieldCheck, FormData, MAX_TITLE_LEN},
};

pub struct SongValidator;

impl SongValidator {
    /// Turns a multipart song upload into a creation request, reporting every
    /// invalid field at once.
    pub fn create_request(form: &FormData) -> Result<CreateSongRequest> {
        let mut check = FieldCheck::new();

        let title = check.required_text(form, "title", MAX_TITLE_LEN);
        let release_date = check.optional_date(form, "release_date");
        let original = check.flag(form, "original", true);
        let youtube = check.optional_url(form, "youtube");
        let note = check.optional_text(form, "note");
        let lyrics = check.optional_text(form, "lyrics");
        let features = check.optional_text(form, "features");
        let albums = check.ids(form, "albums");
        let alternatives = check.ids(form, "alternatives");
        let artwork = check.required_file(form, "artwork");
        let mp3 = check.required_file(form, "mp3");
        let wav = check.optional_file(form, "wav");
        let flac = check.optional_file(form, "flac");

        check.finish()?;
        let Some((artwork, mp3)) = artwork.zip(mp3) else {
            return Err(Error::invalid_field("mp3", "No file was submitted."));
        };

        Ok(CreateSongRequest {
            title,
            release_date,
            original,
            youtube,
            note,
            lyrics,
            features,
            albums,
            alternatives,
            artwork,
            mp3,
            wav,
            flac,
        })
    }

    pub fn validate_modify(song_id: &str, request: &ModifySongRequest) -> Result<()> {
        let mut check = FieldCheck::new();

        if let Some(title) = &request.title {
            check.title("title", title, MAX_TITLE_LEN);
        }
        if let Some(youtube) = &request.youtube {
            check.url("youtube", youtube);
        }
        if let Some(alternatives) = &request.alternatives {
            check.not_self("alternatives", song_id, alternatives);
        }

        check.finish()
    }
}
