use crate::{
    error::Result,
    models::comment::{CreateCommentRequest, ModifyCommentRequest},
    validators::form_validator::{FieldCheck, MAX_NICKNAME_LEN},
};

pub struct CommentValidator;

impl CommentValidator {
    pub fn validate_create(request: &CreateCommentRequest) -> Result<()> {
        let mut check = FieldCheck::new();
        if request.text.trim().is_empty() {
            check.push("text", "This field may not be blank.");
        }
        check.title("nickname", &request.nickname, MAX_NICKNAME_LEN);
        check.finish()
    }

    pub fn validate_modify(request: &ModifyCommentRequest) -> Result<()> {
        let mut check = FieldCheck::new();
        if let Some(text) = &request.text {
            if text.trim().is_empty() {
                check.push("text", "This field may not be blank.");
            }
        }
        if let Some(nickname) = &request.nickname {
            check.title("nickname", nickname, MAX_NICKNAME_LEN);
        }
        check.finish()
    }
}
