pub mod album_helpers;
pub mod song_helpers;
