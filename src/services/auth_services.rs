// src/services/auth_services.rs - signup/login against the Store
use std::sync::Arc;

use log::{info, warn};

use crate::dtos::auth::{LoginIn, SignupIn};
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, SessionUser, User, validate_password, validate_username};
use crate::repositories::{Store, StoreError};
use crate::services::password;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
}

/// Runs argon2 off the async workers.
async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn signup(&self, input: SignupIn) -> AppResult<User> {
        let username = input.username.trim().to_string();
        validate_username(&username).map_err(AppError::Validation)?;
        validate_password(&input.password).map_err(AppError::Validation)?;

        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let password = input.password;
        let password_hash = blocking(move || password::hash_password(&password)).await?;

        match self
            .store
            .insert_user(NewUser {
                username,
                password_hash,
            })
            .await
        {
            Ok(user) => {
                info!("user {} signed up as {}", user.id, user.username);
                Ok(user)
            }
            Err(StoreError::UniqueViolation(_)) => Err(AppError::DuplicateUsername),
            Err(e) => Err(e.into()),
        }
    }

    /// Both an unknown username and a wrong password yield `InvalidCredentials`.
    pub async fn login(&self, input: LoginIn) -> AppResult<SessionUser> {
        let username = input.username.trim();
        let password = input.password;
        let Some(user) = self.store.find_user_by_username(username).await? else {
            // same argon2 cost as a wrong password
            blocking(move || {
                password::verify_dummy(&password);
                Ok(())
            })
            .await?;
            warn!("login rejected for {:?}", username);
            return Err(AppError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        match blocking(move || password::verify_password(&password, &hash)).await {
            Ok(()) => {
                info!("user {} logged in", user.id);
                Ok(SessionUser::from(&user))
            }
            Err(AppError::InvalidCredentials) => {
                warn!("login rejected for {:?}", username);
                Err(AppError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()))
    }

    fn signup_in(username: &str, password: &str) -> SignupIn {
        SignupIn {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn login_in(username: &str, password: &str) -> LoginIn {
        LoginIn {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn signup_stores_a_hash_not_the_password() {
        let svc = service();
        let user = svc.signup(signup_in("alice", "secret1")).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[actix_web::test]
    async fn second_signup_is_duplicate() {
        let svc = service();
        svc.signup(signup_in("alice", "secret1")).await.unwrap();
        assert!(matches!(
            svc.signup(signup_in(" alice ", "other-pass")).await,
            Err(AppError::DuplicateUsername)
        ));
    }

    #[actix_web::test]
    async fn signup_validates_input() {
        let svc = service();
        assert!(matches!(
            svc.signup(signup_in("", "secret1")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.signup(signup_in("   ", "secret1")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.signup(signup_in("alice", "")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.signup(signup_in(&"x".repeat(51), "secret1")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn short_and_non_ascii_usernames_sign_up() {
        let svc = service();
        for name in ["jo", "José", "mary ann"] {
            let user = svc.signup(signup_in(name, "pw")).await.unwrap();
            assert_eq!(user.username, name);
            let session = svc.login(login_in(name, "pw")).await.unwrap();
            assert_eq!(session.user_id, user.id);
        }
    }

    #[actix_web::test]
    async fn login_checks_password() {
        let svc = service();
        let user = svc.signup(signup_in("alice", "secret1")).await.unwrap();

        let session = svc.login(login_in("alice", "secret1")).await.unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.username, "alice");

        assert!(matches!(
            svc.login(login_in("alice", "wrong-pass")).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[actix_web::test]
    async fn unknown_user_looks_like_bad_password() {
        let svc = service();
        let err = svc.login(login_in("nobody", "secret1")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.to_string(), "invalid username or password");
    }
}
