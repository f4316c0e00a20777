//! Pure ownership/role predicates shared by every lifecycle manager.
//!
//! Checks always run before any write, so a failed check never leaves a
//! partially-applied mutation behind.

use crate::domain::Role;

pub fn is_owner(acting_user_id: &str, owner_id: &str) -> bool {
    acting_user_id == owner_id
}

pub fn is_admin(role: Role) -> bool {
    role == Role::Admin
}

/// Admin-or-owner check used where an admin override is part of the contract
/// (interview operations). Job and application writes deliberately use
/// [`is_owner`] alone.
pub fn can_act(acting_user_id: &str, role: Role, owner_id: &str) -> bool {
    is_admin(role) || is_owner(acting_user_id, owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_check_compares_ids_exactly() {
        assert!(is_owner("user-1", "user-1"));
        assert!(!is_owner("user-1", "user-2"));
        assert!(!is_owner("user-1", "USER-1"));
    }

    #[test]
    fn only_admin_role_is_admin() {
        assert!(is_admin(Role::Admin));
        assert!(!is_admin(Role::Recruiter));
        assert!(!is_admin(Role::Candidate));
    }

    #[test]
    fn can_act_allows_admin_or_owner() {
        assert!(can_act("admin-1", Role::Admin, "rec-1"));
        assert!(can_act("rec-1", Role::Recruiter, "rec-1"));
        assert!(!can_act("rec-2", Role::Recruiter, "rec-1"));
        assert!(!can_act("cand-1", Role::Candidate, "rec-1"));
    }
}
