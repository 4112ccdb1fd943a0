use std::fmt;

use uuid::Uuid;

/// How a single post is addressed: by its id or by its slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostKey {
    Id(Uuid),
    Slug(String),
}

impl PostKey {
    /// Anything that parses as a UUID is treated as an id, the rest as a slug.
    /// Generated slugs never parse as UUIDs, so this split is unambiguous.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(id) => PostKey::Id(id),
            Err(_) => PostKey::Slug(raw.to_string()),
        }
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostKey::Id(id) => write!(f, "{}", id),
            PostKey::Slug(slug) => write!(f, "{}", slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_as_id() {
        let id = Uuid::new_v4();
        assert_eq!(PostKey::parse(&id.to_string()), PostKey::Id(id));
    }

    #[test]
    fn test_parse_text_as_slug() {
        assert_eq!(
            PostKey::parse("hello-world"),
            PostKey::Slug("hello-world".to_string())
        );
    }
}
