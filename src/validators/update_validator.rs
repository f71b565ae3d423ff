use crate::{
    error::Result,
    models::update::{CreateUpdateRequest, ModifyUpdateRequest},
    validators::form_validator::{FieldCheck, MAX_UPDATE_TITLE_LEN},
};

pub struct UpdateValidator;

impl UpdateValidator {
    pub fn validate_create(request: &CreateUpdateRequest) -> Result<()> {
        let mut check = FieldCheck::new();
        check.title("title", &request.title, MAX_UPDATE_TITLE_LEN);
        if request.content.trim().is_empty() {
            check.push("content", "This field may not be blank.");
        }
        check.finish()
    }

    pub fn validate_modify(request: &ModifyUpdateRequest) -> Result<()> {
        let mut check = FieldCheck::new();
        if let Some(title) = &request.title {
            check.title("title", title, MAX_UPDATE_TITLE_LEN);
        }
        if let Some(content) = &request.content {
            if content.trim().is_empty() {
                check.push("content", "This field may not be blank.");
            }
        }
        check.finish()
    }
}
