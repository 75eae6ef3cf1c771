use serde::{Deserialize, Serialize};

use crate::models::post::Post;
use crate::services::listing_services::PostPage;
use crate::services::pagination::Pagination;

/// Query string of `/`. `page` stays a string so junk like `?page=abc` falls back
/// to page 1 instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    /// Unparseable or non-positive values give page 1.
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(|p| p.clamp(1, i64::from(u32::MAX)) as u32)
            .unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
pub struct IndexOut {
    pub posts: Vec<Post>,
    pub query: String,
    pub pagination: Pagination,
    /// Page links for the pager; `None` is a gap.
    pub page_window: Vec<Option<u32>>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

pub fn page_url(query: Option<&str>, page: u32) -> String {
    match query {
        Some(q) => format!("/?q={}&page={}", urlencoding::encode(q), page),
        None => format!("/?page={}", page),
    }
}

impl From<PostPage> for IndexOut {
    fn from(page: PostPage) -> Self {
        let query = page.query.as_deref();
        let prev_url = page.pagination.prev_num.map(|n| page_url(query, n));
        let next_url = page.pagination.next_num.map(|n| page_url(query, n));

        IndexOut {
            page_window: page.pagination.window(),
            prev_url,
            next_url,
            query: page.query.unwrap_or_default(),
            posts: page.items,
            pagination: page.pagination,
        }
    }
}
