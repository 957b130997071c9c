//! HTTP client for the storefront server.
use log::info;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Response,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;
use zelaina_engine::db_types::{Order, UserSummary};
use zelaina_server::data_objects::{
    AuthResponse,
    ErrorBody,
    LoginRequest,
    OrderRequest,
    OrderResponse,
    RegisterRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered, and the answer was "no". Carries the server's error message.
    #[error("{0}")]
    Rejected(String),
    #[error("Could not reach the server. {0}")]
    Transport(String),
    #[error("Unexpected response from the server. {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

/// The one call the checkout flow makes over the network. A seam so the submit-then-clear flow
/// can be driven against a canned gateway in tests; [`StorefrontClient`] is the real thing.
#[allow(async_fn_in_trait)]
pub trait OrderSubmission {
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse, ClientError>;
}

pub struct StorefrontClient {
    client: Client,
    server: Url,
}

impl StorefrontClient {
    pub fn new(server: Url) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("Zelaina Storefront Client")
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client, server })
    }

    pub fn server(&self) -> &str {
        self.server.as_str()
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.server.join(path).map_err(|e| ClientError::InvalidResponse(format!("Failed to join URL: {e}")))
    }

    pub async fn health(&self) -> Result<String, ClientError> {
        let res = self.client.get(self.url("/health")?).send().await?;
        Ok(res.text().await?)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = RegisterRequest { name: name.into(), email: email.into(), password: password.into() };
        let res = self.client.post(self.url("/api/auth/register")?).json(&body).send().await?;
        let auth: AuthResponse = decode(res).await?;
        info!("🔑️ Registered as {} (user #{})", auth.user.name, auth.user.id);
        Ok(auth)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest { email: email.into(), password: password.into() };
        let res = self.client.post(self.url("/api/auth/login")?).json(&body).send().await?;
        let auth: AuthResponse = decode(res).await?;
        info!("🔑️ Logged in as {} (user #{})", auth.user.name, auth.user.id);
        Ok(auth)
    }

    pub async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, ClientError> {
        let res = self.client.get(self.url(&format!("/api/orders/{user_id}"))?).send().await?;
        decode(res).await
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, ClientError> {
        let res = self.client.get(self.url("/api/all-orders")?).send().await?;
        decode(res).await
    }

    pub async fn users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let res = self.client.get(self.url("/api/users")?).send().await?;
        decode(res).await
    }
}

impl OrderSubmission for StorefrontClient {
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse, ClientError> {
        let res = self.client.post(self.url("/api/orders")?).json(order).send().await?;
        decode(res).await
    }
}

/// Decodes a successful response as `T`, or turns an error response into [`ClientError::Rejected`]
/// using the server's `{"error": ...}` body when it has one.
async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    if res.status().is_success() {
        Ok(res.json().await?)
    } else {
        let status = res.status();
        let raw = res.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&raw) {
            Ok(body) => body.error,
            Err(_) if raw.is_empty() => format!("Server returned {status}"),
            Err(_) => raw,
        };
        Err(ClientError::Rejected(message))
    }
}
