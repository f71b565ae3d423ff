use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub song_id: String,
    pub text: String,
    pub nickname: String,
    pub date: DateTime<Utc>, // set once, at creation
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateCommentRequest {
    pub text: String,
    pub nickname: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ModifyCommentRequest {
    pub text: Option<String>,
    pub nickname: Option<String>,
}
