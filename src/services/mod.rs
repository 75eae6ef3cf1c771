pub mod auth_services;
pub mod listing_services;
pub mod pagination;
pub mod password;
pub mod post_services;
