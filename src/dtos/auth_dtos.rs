use serde::{Deserialize, Serialize};

/// Form body of `POST /signup`. Missing fields arrive as empty strings and are
/// rejected by validation, not by the extractor.
#[derive(Debug, Deserialize, Serialize)]
pub struct SignupIn {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Form body of `POST /login`.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginIn {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
