use serde::{Deserialize, Serialize};

use crate::models::post::Post;

/// Form body of `POST /create` and `POST /edit/{id}`.
#[derive(Debug, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// What a form page needs: where to submit, which fields, and the post when editing.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}
