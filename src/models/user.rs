use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Bcrypt hash. Never serialized into a response body.
    #[serde(skip_serializing)]
    pub password: String,
    pub full_name: String,
    pub roles: Vec<Role>,
    pub is_blocked: bool,
    /// Principal that last modified this record, if any.
    pub last_update_by: Option<Uuid>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn sample_user(roles: Vec<Role>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password: "$2b$10$hash".to_string(),
            full_name: "Test User".to_string(),
            roles,
            is_blocked: false,
            last_update_by: None,
        }
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = sample_user(vec![Role::User]);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["fullName"], "Test User");
        assert_eq!(json["isBlocked"], false);
    }

    #[test]
    fn has_role_checks_membership() {
        let user = sample_user(vec![Role::User, Role::SuperUser]);
        assert!(user.has_role(Role::SuperUser));
        assert!(!user.has_role(Role::Admin));
    }
}
