use serde::{Deserialize, Serialize};

/// Width of `users.username`.
pub const USERNAME_MAX_LEN: usize = 50;

/// Row `users`. The hash is an argon2 PHC string and never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Insert payload for `users`; built only after the password has been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Who is logged in, as carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Claims of the signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// subject / user id
    pub sub: String,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(format!("Username must be at most {} characters", USERNAME_MAX_LEN));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_non_blank_username() {
        for name in ["alice", "jo", "José", "mary ann", "bob_the.builder-2"] {
            assert!(validate_username(name).is_ok(), "{}", name);
        }
        assert!(validate_username(&"é".repeat(50)).is_ok());
    }

    #[test]
    fn rejects_blank_or_overlong_usernames() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn password_only_needs_to_be_present() {
        assert!(validate_password("").is_err());
        assert!(validate_password("pw").is_ok());
    }
}
