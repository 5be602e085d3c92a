// src/auth/mod.rs - Signed-in user and role gating

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::validation::{FieldErrors, FormField};

pub type UserId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "customer" | "user" => Self::Customer,
            _ => Self::Unknown,
        }
    }
}

/// The user returned by `GET /users/currentUser`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl CurrentUser {
    /// First word of the full name, used in the header greeting
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

impl FormField for LoginField {
    fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl LoginData {
    pub fn validate(&self) -> FieldErrors<LoginField> {
        let mut errors = FieldErrors::new();
        if self.email.trim().is_empty() {
            errors.insert(LoginField::Email, "Email is a required field");
        } else if !self.email.contains('@') {
            errors.insert(LoginField::Email, "Email must be a valid email");
        }
        if self.password.is_empty() {
            errors.insert(LoginField::Password, "Password is a required field");
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No session check has completed yet
    #[default]
    Unknown,
    Authenticated {
        user: CurrentUser,
        since: DateTime<Utc>,
    },
    Anonymous,
}

/// What the route guard decides for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Pending,
    Granted,
    NotLoggedIn,
    Forbidden,
}

/// Application-scoped view of who is signed in.
///
/// Populated once the session check succeeds and cleared on logout. The UI
/// provides it through context; nothing reads it as global state.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    state: SessionState,
    required_role: Role,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new(Role::Admin)
    }
}

impl AuthContext {
    pub fn new(required_role: Role) -> Self {
        Self {
            state: SessionState::Unknown,
            required_role,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Records the outcome of `GET /users/currentUser`
    pub fn session_checked(&mut self, user: Option<CurrentUser>) {
        self.state = match user {
            Some(user) => {
                tracing::info!(user_id = %user.id, role = ?user.role, "session established");
                SessionState::Authenticated {
                    user,
                    since: Utc::now(),
                }
            }
            None => SessionState::Anonymous,
        };
    }

    pub fn logged_out(&mut self) {
        tracing::info!("session cleared");
        self.state = SessionState::Anonymous;
    }

    pub fn access(&self) -> Access {
        match &self.state {
            SessionState::Unknown => Access::Pending,
            SessionState::Anonymous => Access::NotLoggedIn,
            SessionState::Authenticated { user, .. } if user.role == self.required_role => {
                Access::Granted
            }
            SessionState::Authenticated { .. } => Access::Forbidden,
        }
    }

    pub fn greeting(&self) -> String {
        match self.current_user() {
            Some(user) => format!("Hello, {}", user.first_name()),
            None => "Hello".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: "u1".to_string(),
            full_name: "Linh Tran".to_string(),
            email: "linh@example.com".to_string(),
            role,
            avatar: None,
            phone_number: None,
        }
    }

    #[test]
    fn test_session_lifecycle() {
        let mut auth = AuthContext::default();
        assert_eq!(auth.access(), Access::Pending);

        auth.session_checked(Some(user(Role::Admin)));
        assert_eq!(auth.access(), Access::Granted);
        assert_eq!(auth.greeting(), "Hello, Linh");

        auth.logged_out();
        assert_eq!(auth.access(), Access::NotLoggedIn);
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_wrong_role_is_forbidden() {
        let mut auth = AuthContext::default();
        auth.session_checked(Some(user(Role::Customer)));
        assert_eq!(auth.access(), Access::Forbidden);
        assert_eq!(auth.current_user().map(|u| u.role), Some(Role::Customer));
    }

    #[test]
    fn test_current_user_deserializes_backend_shape() {
        let json = r#"{"_id":"42","fullName":"An Le","email":"an@x.io","role":"admin","avatar":null}"#;
        let user: CurrentUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.role, Role::Admin);
        assert!(user.phone_number.is_none());
    }

    #[test]
    fn test_login_validation() {
        let errors = LoginData::default().validate();
        assert_eq!(errors.get(LoginField::Email), Some("Email is a required field"));
        assert_eq!(
            errors.get(LoginField::Password),
            Some("Password is a required field")
        );

        let ok = LoginData {
            email: "a@b.c".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_empty());
    }
}
