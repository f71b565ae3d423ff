pub mod album;
pub mod asset;
pub mod comment;
pub mod song;
pub mod track;
pub mod update;

pub mod pagination;
