use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use serde_json::json;
use zelaina_engine::{db_types::User, traits::AuthApiError, AuthApi};

use super::{helpers::post_request, mocks::MockAuthManager};
use crate::routes::{LoginRoute, RegisterRoute};

fn stored_user() -> User {
    User {
        id: 1,
        name: "Ольга".to_string(),
        email: "olga@example.com".to_string(),
        password: "secret123".to_string(),
        created_at: Utc::now(),
    }
}

fn configure(auth_manager: MockAuthManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(RegisterRoute::<MockAuthManager>::new())
            .service(LoginRoute::<MockAuthManager>::new())
            .app_data(web::Data::new(AuthApi::new(auth_manager)));
    }
}

#[actix_web::test]
async fn register_new_user() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuthManager::new();
    auth.expect_email_is_registered().returning(|_| Ok(false));
    auth.expect_register_user()
        .withf(|u| u.email == "olga@example.com" && u.password == "secret123")
        .returning(|_| Ok(stored_user()));
    let body = json!({ "name": "Ольга", "email": "olga@example.com", "password": "secret123" });
    let (status, body) = post_request("/api/auth/register", &body, configure(auth)).await;
    assert_eq!(status, StatusCode::OK);
    let res: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(res["success"], json!(true));
    assert_eq!(res["message"], json!("Registration successful!"));
    assert_eq!(res["user"], json!({ "id": 1, "name": "Ольга" }));
}

#[actix_web::test]
async fn register_duplicate_email() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuthManager::new();
    auth.expect_email_is_registered().returning(|_| Ok(true));
    auth.expect_register_user().never();
    let body = json!({ "name": "Ольга", "email": "olga@example.com", "password": "secret123" });
    let (status, body) = post_request("/api/auth/register", &body, configure(auth)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "A user with this email is already registered" }).to_string());
}

#[actix_web::test]
async fn register_rejects_invalid_email() {
    let _ = env_logger::try_init().ok();
    // No expectations. Validation fails before the backend is touched.
    let auth = MockAuthManager::new();
    let body = json!({ "name": "Ольга", "email": "not-an-email", "password": "secret123" });
    let (status, body) = post_request("/api/auth/register", &body, configure(auth)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Please provide a valid email address" }).to_string());
}

#[actix_web::test]
async fn login_with_valid_credentials() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuthManager::new();
    auth.expect_fetch_user_by_credentials()
        .withf(|email, password| email == "olga@example.com" && password == "secret123")
        .returning(|_, _| Ok(Some(stored_user())));
    let body = json!({ "email": "olga@example.com", "password": "secret123" });
    let (status, body) = post_request("/api/auth/login", &body, configure(auth)).await;
    assert_eq!(status, StatusCode::OK);
    let res: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(res["message"], json!("Login successful!"));
    assert_eq!(res["user"]["id"], json!(1));
}

#[actix_web::test]
async fn login_with_bad_credentials() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuthManager::new();
    auth.expect_fetch_user_by_credentials().returning(|_, _| Ok(None));
    let body = json!({ "email": "olga@example.com", "password": "wrong" });
    let (status, body) = post_request("/api/auth/login", &body, configure(auth)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid email or password" }).to_string());
}

#[actix_web::test]
async fn login_surfaces_backend_failure() {
    let _ = env_logger::try_init().ok();
    let mut auth = MockAuthManager::new();
    auth.expect_fetch_user_by_credentials()
        .returning(|_, _| Err(AuthApiError::DatabaseError("connection reset".to_string())));
    let body = json!({ "email": "olga@example.com", "password": "secret123" });
    let (status, _body) = post_request("/api/auth/login", &body, configure(auth)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
