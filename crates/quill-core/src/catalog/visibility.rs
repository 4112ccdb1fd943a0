use chrono::NaiveDate;

use crate::domain::Post;

/// A post is public once it is not a draft and its publish date has arrived.
pub fn is_public(post: &Post, today: NaiveDate) -> bool {
    !post.draft && post.publish <= today
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostFields;
    use chrono::Utc;
    use uuid::Uuid;

    fn post(draft: bool, publish: NaiveDate) -> Post {
        let fields = PostFields {
            title: "t".to_string(),
            content: "c".to_string(),
            draft,
            publish,
        };
        Post::new(Uuid::new_v4(), "t".to_string(), fields, Utc::now())
    }

    #[test]
    fn test_visibility_rules() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert!(is_public(&post(false, yesterday), today));
        assert!(is_public(&post(false, today), today));
        assert!(!is_public(&post(false, tomorrow), today));
        assert!(!is_public(&post(true, yesterday), today));
        assert!(!is_public(&post(true, tomorrow), today));
    }
}
