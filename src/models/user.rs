use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Roles a user record can carry.
///
/// The stored `role` column is free text, so comparisons go through
/// [`Role::matches`], which is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Hr => "HR",
            Role::Employee => "Employee",
        }
    }

    /// `true` only when the stored value is exactly this role's name.
    pub fn matches(&self, stored: Option<&str>) -> bool {
        stored == Some(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "HR" => Ok(Role::Hr),
            "Employee" => Ok(Role::Employee),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A stored user document.
///
/// Profile members the caller supplied at registration (name, photo,
/// designation, ...) are kept as-is and flattened back into the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "isVerify", default)]
    pub is_verify: bool,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        role.matches(self.role.as_deref())
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub role: Option<String>,
    pub is_verify: bool,
    pub profile: String,
}

impl TryFrom<UserRow> for User {
    type Error = serde_json::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            role: row.role,
            is_verify: row.is_verify,
            profile: serde_json::from_str(&row.profile)?,
        })
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Accepted so it never lands in `profile`; registration always stores `false`.
    #[serde(rename = "isVerify", default)]
    pub is_verify: bool,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl NewUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_match_is_case_sensitive() {
        assert!(Role::Admin.matches(Some("Admin")));
        assert!(!Role::Admin.matches(Some("admin")));
        assert!(!Role::Admin.matches(Some("HR")));
        assert!(!Role::Admin.matches(None));
        assert!(Role::Hr.matches(Some("HR")));
        assert!(!Role::Hr.matches(Some("Hr")));
    }

    #[test]
    fn role_parses_exact_names_only() {
        assert_eq!("Employee".parse::<Role>().unwrap(), Role::Employee);
        assert!("employee".parse::<Role>().is_err());
    }

    #[test]
    fn user_serializes_with_document_field_names() {
        let mut profile = Map::new();
        profile.insert("name".to_string(), json!("Alice"));
        let user = User {
            id: "abc".to_string(),
            email: "alice@example.com".to_string(),
            role: Some("HR".to_string()),
            is_verify: true,
            profile,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "abc",
                "email": "alice@example.com",
                "role": "HR",
                "isVerify": true,
                "name": "Alice"
            })
        );
    }

    #[test]
    fn new_user_collects_unknown_members_into_profile() {
        let new_user: NewUser = serde_json::from_value(json!({
            "email": "bob@example.com",
            "name": "Bob",
            "salary": 4200
        }))
        .unwrap();

        assert_eq!(new_user.email, "bob@example.com");
        assert_eq!(new_user.role, None);
        assert!(!new_user.is_verify);
        assert_eq!(new_user.profile.get("salary"), Some(&json!(4200)));
        assert!(!new_user.profile.contains_key("email"));
    }
}
