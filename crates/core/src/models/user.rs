//! User accounts.

use serde::{Deserialize, Serialize};

use crate::types::{Role, UserId};

/// A registered account as stored by the catalog service.
///
/// `Debug` is implemented manually to keep the password out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub phone: String,
    pub email: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub birthdate: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub nickname: String,
    #[serde(default)]
    pub role: Role,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("birthdate", &self.birthdate)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("middle_name", &self.middle_name)
            .field("nickname", &self.nickname)
            .field("role", &self.role)
            .finish()
    }
}

impl User {
    /// The editable part of the account.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            phone: self.phone.clone(),
            email: self.email.clone(),
            birthdate: self.birthdate.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            middle_name: self.middle_name.clone(),
            nickname: self.nickname.clone(),
            role: self.role,
        }
    }
}

/// Account fields without the id: the body of registration (POST) and of a
/// profile update (PATCH).
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub phone: String,
    pub email: String,
    pub birthdate: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub nickname: String,
    pub role: Role,
}

impl std::fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProfile")
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("nickname", &self.nickname)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": 4,
        "phone": "+375 (29) 123-45-67",
        "email": "anna@mail.by",
        "birthdate": "1999-04-01",
        "password": "Birch@2024",
        "firstName": "Anna",
        "lastName": "Kovalenko",
        "nickname": "AnKo42",
        "role": "admin"
    }"#;

    #[test]
    fn test_deserialize_record() {
        let user: User = serde_json::from_str(RECORD).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.middle_name.is_empty());
        assert_eq!(user.profile().first_name, "Anna");
    }

    #[test]
    fn test_debug_redacts_password() {
        let user: User = serde_json::from_str(RECORD).unwrap();
        let debug = format!("{user:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("Birch@2024"));
    }

    #[test]
    fn test_profile_body_is_camel_case() {
        let user: User = serde_json::from_str(RECORD).unwrap();
        let body = serde_json::to_value(user.profile()).unwrap();
        assert_eq!(body["firstName"], "Anna");
        assert_eq!(body["role"], "admin");
        assert!(body.get("id").is_none());
    }
}
