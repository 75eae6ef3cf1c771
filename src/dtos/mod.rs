pub mod auth_dtos;
pub mod comment_dtos;
pub mod listing_dtos;
pub mod post_dtos;
// alias so handlers can write `crate::dtos::auth`
pub use auth_dtos as auth;
