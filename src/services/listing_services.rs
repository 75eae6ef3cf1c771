// src/services/listing_services.rs - filtered, ordered, paginated post listing

use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::errors::AppResult;
use crate::models::post::Post;
use crate::repositories::Store;
use crate::services::pagination::{DEFAULT_PER_PAGE, Pagination};

#[derive(Debug, Serialize)]
pub struct PostPage {
    pub items: Vec<Post>,
    /// The trimmed search term, `None` for an unfiltered listing.
    pub query: Option<String>,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn Store>,
    per_page: u32,
}

impl ListingService {
    pub fn new(store: Arc<dyn Store>, per_page: u32) -> Self {
        Self {
            store,
            per_page: if per_page == 0 { DEFAULT_PER_PAGE } else { per_page },
        }
    }

    /// Posts newest first, optionally narrowed to those whose title or content
    /// contains `query` (case-insensitive). Pages below 1 are read as page 1; pages
    /// past the end come back empty.
    pub async fn list_posts(&self, query: Option<&str>, page: u32) -> AppResult<PostPage> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let total = self.store.count_posts(query).await?;
        let pagination = Pagination::new(page, self.per_page, total);
        let items = if pagination.offset() >= total {
            Vec::new()
        } else {
            self.store
                .list_posts(query, u64::from(pagination.per_page), pagination.offset())
                .await?
        };

        debug!(
            "listing q={:?} page={} -> {} of {} posts",
            query,
            pagination.page,
            items.len(),
            total
        );

        Ok(PostPage {
            items,
            query: query.map(str::to_string),
            pagination,
        })
    }
}
