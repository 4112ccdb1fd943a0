//! Slug derivation for post titles.
//!
//! Titles are transliterated and slugified with the `slug` crate. Uniqueness is
//! checked through a caller-supplied async predicate so the helper stays free
//! of any storage concern.

use std::future::Future;

use slug::slugify;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{DomainError, RepoError};

const MAX_SUFFIX_ATTEMPTS: usize = 32;
const FALLBACK_SLUG: &str = "post";

/// Errors that can occur while generating a unique slug.
#[derive(Debug, Error)]
pub enum SlugError {
    #[error("exhausted attempts to find a unique slug for `{base}`")]
    Exhausted { base: String },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<SlugError> for DomainError {
    fn from(err: SlugError) -> Self {
        match err {
            SlugError::Exhausted { base } => {
                DomainError::Internal(format!("no free slug for `{}`", base))
            }
            SlugError::Repo(e) => e.into(),
        }
    }
}

/// Derive the base slug for a title. Never empty.
pub fn derive_slug(title: &str) -> String {
    let candidate = slugify(title);
    if candidate.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        candidate
    }
}

/// A slug that reads as a UUID would be looked up as a post id.
fn is_reserved(candidate: &str) -> bool {
    Uuid::parse_str(candidate).is_ok()
}

/// Produce a slug for `title` that the `is_taken` predicate reports as free.
///
/// Collisions are resolved by suffixing a counter (`-2`, `-3`, ...). A base
/// that parses as a UUID always gets a suffix.
pub async fn unique_slug<F, Fut>(title: &str, mut is_taken: F) -> Result<String, SlugError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, RepoError>>,
{
    let base = derive_slug(title);

    if !is_reserved(&base) && !is_taken(base.clone()).await? {
        return Ok(base);
    }

    for attempt in 2..=MAX_SUFFIX_ATTEMPTS + 1 {
        let candidate = format!("{base}-{attempt}");
        if !is_reserved(&candidate) && !is_taken(candidate.clone()).await? {
            return Ok(candidate);
        }
    }

    Err(SlugError::Exhausted { base })
}
