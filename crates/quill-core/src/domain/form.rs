//! Typed inputs for creating and editing posts, and their validation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Longest accepted title, in characters.
pub const TITLE_MAX_CHARS: usize = 120;

const REQUIRED: &str = "This field is required.";

/// Field name -> error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validated values for the editable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub draft: bool,
    pub publish: NaiveDate,
}

/// Input for creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub draft: Option<bool>,
    pub publish: Option<NaiveDate>,
}

impl NewPost {
    pub fn validate(&self) -> Result<PostFields, FieldErrors> {
        validate_fields(
            self.title.as_deref(),
            self.content.as_deref(),
            self.draft,
            self.publish,
        )
    }
}

/// Input for editing a post. Only these four fields can ever change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub draft: Option<bool>,
    pub publish: Option<NaiveDate>,
}

impl PostChanges {
    pub fn validate(&self) -> Result<PostFields, FieldErrors> {
        validate_fields(
            self.title.as_deref(),
            self.content.as_deref(),
            self.draft,
            self.publish,
        )
    }
}

fn validate_fields(
    title: Option<&str>,
    content: Option<&str>,
    draft: Option<bool>,
    publish: Option<NaiveDate>,
) -> Result<PostFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        errors.add("title", REQUIRED);
    } else {
        let length = title.chars().count();
        if length > TITLE_MAX_CHARS {
            errors.add(
                "title",
                format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    TITLE_MAX_CHARS, length
                ),
            );
        }
    }

    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        errors.add("content", REQUIRED);
    }

    if publish.is_none() {
        errors.add("publish", REQUIRED);
    }

    match publish {
        Some(publish) if errors.is_empty() => Ok(PostFields {
            title: title.to_string(),
            content: content.to_string(),
            draft: draft.unwrap_or(false),
            publish,
        }),
        _ => Err(errors),
    }
}
