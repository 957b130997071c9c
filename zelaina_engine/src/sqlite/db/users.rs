use sqlx::SqliteConnection;

use crate::db_types::{NewUser, User, UserSummary};

pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as(
        r#"
            INSERT INTO users (name, email, password, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(user.name)
    .bind(user.email)
    .bind(user.password)
    .bind(chrono::Utc::now())
    .fetch_one(conn)
    .await?;
    Ok(user)
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_user_by_credentials(
    email: &str,
    password: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1 AND password = $2")
        .bind(email)
        .bind(password)
        .fetch_optional(conn)
        .await?;
    Ok(user)
}

pub async fn fetch_all_users(conn: &mut SqliteConnection) -> Result<Vec<UserSummary>, sqlx::Error> {
    let users = sqlx::query_as("SELECT id, name, email, created_at FROM users").fetch_all(conn).await?;
    Ok(users)
}
