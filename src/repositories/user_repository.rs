// src/repositories/user_repository.rs

use deadpool_postgres::Client;
use tokio_postgres::Row;

use crate::models::user::{NewUser, User};
use crate::repositories::StoreResult;

pub struct UserRepository;

fn user_from_row(row: &Row) -> Result<User, tokio_postgres::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
    })
}

impl UserRepository {
    pub async fn create_user(client: &Client, user: &NewUser) -> StoreResult<User> {
        let stmt = client
            .prepare_cached(
                "INSERT INTO users (username, password_hash) VALUES ($1, $2) \
                 RETURNING id, username, password_hash",
            )
            .await?;
        let row = client
            .query_one(&stmt, &[&user.username, &user.password_hash])
            .await?;
        Ok(user_from_row(&row)?)
    }

    pub async fn find_by_username(client: &Client, username: &str) -> StoreResult<Option<User>> {
        let stmt = client
            .prepare_cached("SELECT id, username, password_hash FROM users WHERE username = $1")
            .await?;
        let row = client.query_opt(&stmt, &[&username]).await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }
}
