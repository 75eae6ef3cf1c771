// src/middleware/auth_extractor.rs - signed session cookie and the logged-in user extractor
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::Utc;
use futures::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::user::{SessionClaims, SessionUser};

pub const SESSION_COOKIE: &str = "session";

/// Signs and verifies session tokens. One instance is shared by all workers.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn token_for(&self, user: &SessionUser) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.user_id.to_string(),
            username: user.username.clone(),
            iat: now.max(0) as usize,
            exp: (now + self.ttl_secs).max(0) as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign session: {}", e)))
    }

    /// `None` for a bad signature, an expired token or a malformed subject.
    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        let data = match decode::<SessionClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        ) {
            Ok(data) => data,
            Err(e) => {
                debug!("ignoring session cookie: {}", e);
                return None;
            }
        };

        let user_id = data.claims.sub.parse::<i64>().ok()?;
        Some(SessionUser {
            user_id,
            username: data.claims.username,
        })
    }

    /// Establishes the session for `user`.
    pub fn issue(&self, user: &SessionUser) -> AppResult<Cookie<'static>> {
        let token = self.token_for(user)?;
        Ok(Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(self.ttl_secs))
            .finish())
    }

    /// Ends the session. Safe to send when no session exists.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// The logged-in user behind the request. Extracting it on a request without a
/// valid session fails with `LoginRequired`; use `Option<AuthenticatedUser>` where
/// login is optional.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

impl From<SessionUser> for AuthenticatedUser {
    fn from(user: SessionUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<AuthenticatedUser, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(keys) = req.app_data::<web::Data<SessionKeys>>() else {
            return ready(Err(AppError::Internal("session keys not configured".to_string())));
        };

        let user = req
            .cookie(SESSION_COOKIE)
            .and_then(|c| keys.verify(c.value()))
            .map(AuthenticatedUser::from);

        ready(user.ok_or(AppError::LoginRequired))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn alice() -> SessionUser {
        SessionUser {
            user_id: 7,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn issued_cookie_verifies() {
        let keys = SessionKeys::new("test-secret", 3600);
        let cookie = keys.issue(&alice()).unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(keys.verify(cookie.value()), Some(alice()));
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = SessionKeys::new("test-secret", 3600).token_for(&alice()).unwrap();
        assert_eq!(SessionKeys::new("another-secret", 3600).verify(&token), None);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new("test-secret", -3600);
        let token = keys.token_for(&alice()).unwrap();
        assert_eq!(keys.verify(&token), None);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = SessionKeys::new("test-secret", 3600);
        assert_eq!(keys.verify("not.a.token"), None);
        assert_eq!(keys.verify(""), None);
    }

    #[test]
    fn clear_cookie_is_a_removal() {
        let cookie = SessionKeys::new("test-secret", 3600).clear();
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }

    #[actix_web::test]
    async fn extractor_carries_the_session_user_id() {
        let keys = SessionKeys::new("test-secret", 3600);
        let cookie = keys.issue(&alice()).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(keys))
            .cookie(cookie)
            .to_http_request();

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.username, "alice");
    }

    #[actix_web::test]
    async fn extractor_without_cookie_needs_login() {
        let req = TestRequest::default()
            .app_data(web::Data::new(SessionKeys::new("test-secret", 3600)))
            .to_http_request();
        assert!(matches!(
            AuthenticatedUser::extract(&req).await,
            Err(AppError::LoginRequired)
        ));
    }
}
