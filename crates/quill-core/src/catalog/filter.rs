//! Listing filters: base-set visibility, free-text search and ordering.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::{Post, User};

use super::UnknownSetting;
use super::visibility::is_public;

/// Order applied to a listing before it is sliced into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Oldest first, by creation time.
    #[default]
    Insertion,
    /// Newest first, by creation time.
    NewestFirst,
}

impl FromStr for ListOrder {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" | "oldest" => Ok(ListOrder::Insertion),
            "newest" | "newest_first" => Ok(ListOrder::NewestFirst),
            other => Err(UnknownSetting::new("list order", other)),
        }
    }
}

/// A non-empty, trimmed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    /// `None` when the query is absent or blank.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            needle: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The lower-cased form used for matching.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    fn found_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Case-insensitive substring match on title, content, or the author's
    /// first or last name.
    pub fn matches(&self, post: &Post, author: Option<&User>) -> bool {
        self.found_in(&post.title)
            || self.found_in(&post.content)
            || author.is_some_and(|a| self.found_in(&a.first_name) || self.found_in(&a.last_name))
    }
}

/// Everything a repository needs to select and order a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostFilter {
    /// When set, only posts public on this date are included.
    pub visible_on: Option<NaiveDate>,
    pub search: Option<SearchTerm>,
    pub order: ListOrder,
}

impl PostFilter {
    pub fn matches(&self, post: &Post, author: Option<&User>) -> bool {
        if let Some(today) = self.visible_on {
            if !is_public(post, today) {
                return false;
            }
        }
        match &self.search {
            Some(term) => term.matches(post, author),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostFields;
    use chrono::Utc;
    use uuid::Uuid;

    fn author() -> User {
        User::new(
            "ada".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
        )
    }

    fn post(owner: &User, title: &str, content: &str) -> Post {
        let fields = PostFields {
            title: title.to_string(),
            content: content.to_string(),
            draft: false,
            publish: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        Post::new(owner.id, "slug".to_string(), fields, Utc::now())
    }

    #[test]
    fn test_blank_query_is_no_filter() {
        assert!(SearchTerm::parse(None).is_none());
        assert!(SearchTerm::parse(Some("")).is_none());
        assert!(SearchTerm::parse(Some("   ")).is_none());
        assert_eq!(SearchTerm::parse(Some(" Rust ")).unwrap().as_str(), "Rust");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let ada = author();
        let p = post(&ada, "Analytical Engines", "Notes on Bernoulli numbers");

        for query in ["ENGINE", "bernoulli", "ada", "LOVE"] {
            let term = SearchTerm::parse(Some(query)).unwrap();
            assert!(term.matches(&p, Some(&ada)), "expected match for {query}");
        }

        let miss = SearchTerm::parse(Some("babbage")).unwrap();
        assert!(!miss.matches(&p, Some(&ada)));
    }

    #[test]
    fn test_author_fields_need_an_author() {
        let ada = author();
        let p = post(&ada, "Title", "Body");
        let term = SearchTerm::parse(Some("lovelace")).unwrap();

        assert!(term.matches(&p, Some(&ada)));
        assert!(!term.matches(&p, None));
    }

    #[test]
    fn test_filter_applies_visibility_then_search() {
        let ada = author();
        let mut hidden = post(&ada, "Rust tips", "Body");
        hidden.draft = true;
        let shown = post(&ada, "Rust tricks", "Body");
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let filter = PostFilter {
            visible_on: Some(today),
            search: SearchTerm::parse(Some("rust")),
            order: ListOrder::Insertion,
        };

        assert!(!filter.matches(&hidden, Some(&ada)));
        assert!(filter.matches(&shown, Some(&ada)));
        assert!(PostFilter::default().matches(&hidden, Some(&ada)));
    }

    #[test]
    fn test_parse_order() {
        assert_eq!("newest".parse::<ListOrder>().unwrap(), ListOrder::NewestFirst);
        assert_eq!("Insertion".parse::<ListOrder>().unwrap(), ListOrder::Insertion);
        assert!("random".parse::<ListOrder>().is_err());
    }
}
