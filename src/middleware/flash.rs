// src/middleware/flash.rs - single-use status messages carried in a cookie across a redirect
use actix_web::cookie::Cookie;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use futures::future::{Ready, ready};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// "success", "info" or "danger"
    pub category: String,
    pub message: String,
}

impl FlashMessage {
    pub fn new(category: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("success", message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new("info", message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new("danger", message)
    }
}

pub fn encode_flashes(messages: &[FlashMessage]) -> String {
    // Vec of plain strings always serializes
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

pub fn decode_flashes(raw: &str) -> Option<Vec<FlashMessage>> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub fn flash_cookie(messages: &[FlashMessage]) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, encode_flashes(messages))
        .path("/")
        .http_only(true)
        .finish()
}

pub fn clear_flash_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Messages left by the previous response. Whoever renders them must also send
/// `clear_flash_cookie()` so they show only once.
#[derive(Debug, Default)]
pub struct IncomingFlashes(pub Vec<FlashMessage>);

impl IncomingFlashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromRequest for IncomingFlashes {
    type Error = Error;
    type Future = Ready<Result<IncomingFlashes, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let messages = req
            .cookie(FLASH_COOKIE)
            .and_then(|c| decode_flashes(c.value()))
            .unwrap_or_default();
        ready(Ok(IncomingFlashes(messages)))
    }
}
