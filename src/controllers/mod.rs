pub mod album_controller;
pub mod comment_controller;
pub mod song_controller;
pub mod update_controller;
