use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::NaiveDate;
use url::Url;

use crate::{
    error::{Error, FieldErrors, Result},
    models::asset::Asset,
};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_UPDATE_TITLE_LEN: usize = 100;
pub const MAX_NICKNAME_LEN: usize = 100;

/// Text parts and file parts of a multipart body, keyed by field name.
#[derive(Debug, Default)]
pub struct FormData {
    texts: HashMap<String, Vec<String>>,
    files: HashMap<String, Asset>,
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    form.files.insert(name, Asset::new(file_name, bytes));
                }
                None => {
                    let text = field.text().await?;
                    form.texts.entry(name).or_default().push(text);
                }
            }
        }

        Ok(form)
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.texts
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn with_file(mut self, name: &str, asset: Asset) -> Self {
        self.files.insert(name.to_string(), asset);
        self
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Collects every field problem of a request before giving up.
#[derive(Debug, Default)]
pub struct FieldCheck {
    errors: FieldErrors,
}

impl FieldCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                fields: self.errors,
            })
        }
    }

    // -- Plain values

    pub fn title(&mut self, field: &str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.push(field, "This field may not be blank.");
        } else if value.chars().count() > max_len {
            self.push(
                field,
                format!("Ensure this field has no more than {max_len} characters."),
            );
        }
    }

    pub fn url(&mut self, field: &str, value: &str) {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => self.push(field, "Enter a valid URL."),
        }
    }

    /// A record may not list itself among its alternatives.
    pub fn not_self(&mut self, field: &str, id: &str, ids: &[String]) {
        if ids.iter().any(|other| other == id) {
            self.push(field, "An entry cannot be an alternative of itself.");
        }
    }

    // -- Form fields

    pub fn required_text(&mut self, form: &FormData, field: &str, max_len: usize) -> String {
        match form.text(field) {
            Some(value) => {
                self.title(field, value, max_len);
                value.to_string()
            }
            None => {
                self.push(field, "This field is required.");
                String::new()
            }
        }
    }

    pub fn optional_text(&mut self, form: &FormData, field: &str) -> Option<String> {
        form.text(field).map(str::to_string)
    }

    pub fn optional_url(&mut self, form: &FormData, field: &str) -> Option<String> {
        let value = form.text(field)?;
        self.url(field, value);
        Some(value.to_string())
    }

    pub fn optional_date(&mut self, form: &FormData, field: &str) -> Option<NaiveDate> {
        let value = form.text(field)?;
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.push(
                    field,
                    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
                );
                None
            }
        }
    }

    pub fn flag(&mut self, form: &FormData, field: &str, default: bool) -> bool {
        let Some(value) = form.text(field) else {
            return default;
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => true,
            "false" | "0" | "off" | "no" => false,
            _ => {
                self.push(field, "Must be a valid boolean.");
                default
            }
        }
    }

    /// Ids given as repeated fields, comma separated values, or both.
    pub fn ids(&mut self, form: &FormData, field: &str) -> Vec<String> {
        form.texts
            .get(field)
            .map(|values| {
                values
                    .iter()
                    .flat_map(|value| value.split(','))
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn required_file(&mut self, form: &FormData, field: &str) -> Option<Asset> {
        match form.files.get(field) {
            Some(asset) => self.non_empty_file(field, asset),
            None => {
                self.push(field, "No file was submitted.");
                None
            }
        }
    }

    pub fn optional_file(&mut self, form: &FormData, field: &str) -> Option<Asset> {
        let asset = form.files.get(field)?;
        self.non_empty_file(field, asset)
    }

    fn non_empty_file(&mut self, field: &str, asset: &Asset) -> Option<Asset> {
        if asset.bytes.is_empty() {
            self.push(field, "The submitted file is empty.");
            None
        } else {
            Some(asset.clone())
        }
    }
}
