pub mod album_validator;
pub mod comment_validator;
pub mod form_validator;
pub mod song_validator;
pub mod update_validator;
