use crate::error::AppResult;
use crate::models::LoginProfile;
use crate::utils::http::{RequestClient, RequestOptions};
use async_trait::async_trait;
use serde_json::json;

/// Login collaborator for the game backend. The controller only chooses the
/// flow and consumes the resulting profile; session handling stays behind
/// this boundary.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginProfile>;
    async fn login_email(&self, email: &str, password: &str) -> AppResult<LoginProfile>;
}

pub struct HttpAuthClient {
    http: RequestClient,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: RequestClient::new(),
            base_url,
        }
    }

    async fn login_call(&self, path: &str, key: &str, id: &str, password: &str) -> AppResult<LoginProfile> {
        let body = json!({ key: id, "password": password });
        let result = self
            .http
            .post(
                &format!("{}{}", self.base_url, path),
                Some(body),
                RequestOptions::default(),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, username: &str, password: &str) -> AppResult<LoginProfile> {
        self.login_call("/players/login", "username", username, password)
            .await
    }

    async fn login_email(&self, email: &str, password: &str) -> AppResult<LoginProfile> {
        self.login_call("/players/login_email", "email", email, password)
            .await
    }
}
