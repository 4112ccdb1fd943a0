use uuid::Uuid;

/// Role name that grants the staff flag.
pub const STAFF_ROLE: &str = "staff";
/// Role name that grants the superuser flag.
pub const SUPERUSER_ROLE: &str = "superuser";

/// The identity and privilege flags of whoever issued the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    pub user_id: Option<Uuid>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Caller {
    /// A caller without an account and without privileges.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: Uuid, is_staff: bool, is_superuser: bool) -> Self {
        Self {
            user_id: Some(user_id),
            is_staff,
            is_superuser,
        }
    }

    /// Build a caller from the role names carried by an access token.
    pub fn from_roles(user_id: Uuid, roles: &[String]) -> Self {
        Self::user(
            user_id,
            roles.iter().any(|r| r == STAFF_ROLE),
            roles.iter().any(|r| r == SUPERUSER_ROLE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_roles_maps_flags() {
        let id = Uuid::new_v4();
        let caller = Caller::from_roles(id, &["staff".to_string(), "editor".to_string()]);

        assert_eq!(caller.user_id, Some(id));
        assert!(caller.is_staff);
        assert!(!caller.is_superuser);
    }

    #[test]
    fn test_anonymous_has_no_flags() {
        let caller = Caller::anonymous();
        assert!(caller.user_id.is_none());
        assert!(!caller.is_staff && !caller.is_superuser);
    }
}
