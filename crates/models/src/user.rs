use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Staff role a credential signs in as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Provider,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Provider => "provider",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Role::Manager),
            "provider" => Ok(Role::Provider),
            other => Err(ModelError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Sign-in credential. The password is stored and compared as plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self { username: username.into(), password: password.into(), role }
    }

    /// Exact, case-sensitive match on all three fields.
    pub fn matches(&self, username: &str, password: &str, role: Role) -> bool {
        self.username == username && self.password == password && self.role == role
    }
}

/// The users document: map key to credential, in insertion order.
///
/// Map keys usually equal the username, but the seeded entries do not
/// (`provider` maps to user `quinn`), so lookups scan the values.
pub type UserTable = IndexMap<String, User>;

/// Username a provider signs in with: the display name lower-cased with spaces removed.
///
/// No uniqueness check; two providers with the same derived name share one credential slot.
pub fn derive_provider_username(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&User::new("quinn", "quinn123", Role::Provider)).unwrap();
        assert_eq!(json, r#"{"username":"quinn","password":"quinn123","role":"provider"}"#);
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert!("Manager".parse::<Role>().is_err());
    }

    #[test]
    fn matches_is_exact() {
        let u = User::new("Mjin", "Mjin123", Role::Manager);
        assert!(u.matches("Mjin", "Mjin123", Role::Manager));
        assert!(!u.matches("mjin", "Mjin123", Role::Manager));
        assert!(!u.matches("Mjin", "mjin123", Role::Manager));
        assert!(!u.matches("Mjin", "Mjin123", Role::Provider));
    }

    #[test]
    fn derived_username_strips_spaces_only() {
        assert_eq!(derive_provider_username("Jane Roe"), "janeroe");
        assert_eq!(derive_provider_username(" Dr. Ann  Lee "), "dr.annlee");
        assert_eq!(derive_provider_username("O'Neil-Smith"), "o'neil-smith");
    }
}
