//! The authorization gate in front of mutations and unpublished posts.

use std::str::FromStr;

use crate::domain::Caller;

use super::UnknownSetting;

/// Which privilege flags a caller must hold to mutate posts or see
/// unpublished ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Staff *and* superuser. The historical behaviour of the service.
    #[default]
    StaffAndSuperuser,
    /// Staff *or* superuser.
    StaffOrSuperuser,
}

impl AccessPolicy {
    pub fn permits(self, caller: &Caller) -> bool {
        match self {
            AccessPolicy::StaffAndSuperuser => caller.is_staff && caller.is_superuser,
            AccessPolicy::StaffOrSuperuser => caller.is_staff || caller.is_superuser,
        }
    }
}

impl FromStr for AccessPolicy {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "staff_and_superuser" | "both" => Ok(AccessPolicy::StaffAndSuperuser),
            "staff_or_superuser" | "either" => Ok(AccessPolicy::StaffOrSuperuser),
            other => Err(UnknownSetting::new("access policy", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn caller(is_staff: bool, is_superuser: bool) -> Caller {
        Caller::user(Uuid::new_v4(), is_staff, is_superuser)
    }

    #[test]
    fn test_both_flags_required_by_default() {
        let policy = AccessPolicy::default();

        assert!(policy.permits(&caller(true, true)));
        assert!(!policy.permits(&caller(true, false)));
        assert!(!policy.permits(&caller(false, true)));
        assert!(!policy.permits(&caller(false, false)));
        assert!(!policy.permits(&Caller::anonymous()));
    }

    #[test]
    fn test_either_flag_suffices() {
        let policy = AccessPolicy::StaffOrSuperuser;

        assert!(policy.permits(&caller(true, true)));
        assert!(policy.permits(&caller(true, false)));
        assert!(policy.permits(&caller(false, true)));
        assert!(!policy.permits(&caller(false, false)));
        assert!(!policy.permits(&Caller::anonymous()));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(
            "staff_or_superuser".parse::<AccessPolicy>().unwrap(),
            AccessPolicy::StaffOrSuperuser
        );
        assert_eq!(
            " Both ".parse::<AccessPolicy>().unwrap(),
            AccessPolicy::StaffAndSuperuser
        );
        assert!("anyone".parse::<AccessPolicy>().is_err());
    }
}
