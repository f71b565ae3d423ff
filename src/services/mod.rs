pub mod album_service;
pub mod comment_service;
pub mod song_service;
pub mod update_service;

pub mod audio_probe;
pub mod catalog;
pub mod media_store;
pub mod resolver;
pub mod track_sequencer;
