pub mod album_routes;
pub mod comment_routes;
pub mod song_routes;
pub mod update_routes;
