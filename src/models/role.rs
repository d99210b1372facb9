use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo, PgValueRef};

/// Closed set of roles a user may hold. Stored as text[] in Postgres,
/// using the wire strings "admin", "user" and "superUser".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "superUser")]
    SuperUser,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct InvalidRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::SuperUser => "superUser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "superUser" => Ok(Role::SuperUser),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

// Roles live in a plain text[] column, so the sqlx integration delegates
// to the &str impls rather than a Postgres enum type.
impl sqlx::Type<sqlx::Postgres> for Role {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl PgHasArrayType for Role {
    fn array_type_info() -> PgTypeInfo {
        <&str as PgHasArrayType>::array_type_info()
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Role {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

/// Parse a comma-separated role filter, e.g. "admin,superUser".
/// An empty string yields an empty set (no role restriction).
pub fn parse_role_list(raw: &str) -> Result<Vec<Role>, InvalidRole> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(Role::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_wire_strings() {
        for role in [Role::Admin, Role::User, Role::SuperUser] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn super_user_uses_camel_case_wire_string() {
        assert_eq!(Role::SuperUser.as_str(), "superUser");
        assert!("super_user".parse::<Role>().is_err());
    }

    #[test]
    fn parse_role_list_handles_empty_and_csv() {
        assert_eq!(parse_role_list("").unwrap(), vec![]);
        assert_eq!(
            parse_role_list("admin, superUser").unwrap(),
            vec![Role::Admin, Role::SuperUser]
        );
        assert!(parse_role_list("admin,bogus").is_err());
    }
}
