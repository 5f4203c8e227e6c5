use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{AuthResponse, CategoryStat, Notification, StoryDetail, StoryPage};

/// Error body the server sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct TopCategoriesResponse {
    #[serde(default)]
    categories: Vec<CategoryStat>,
}

/// Stateless client for the archive REST API.
///
/// Holds no session: callers pass the bearer token explicitly on
/// authenticated endpoints, so the sync layer stays the single owner
/// of session state.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn list_stories(&self, page: u32, per_page: u32) -> Result<StoryPage, ApiError> {
        let url = format!("{}/stories?page={}&per_page={}", self.base_url, page, per_page);
        let response = self.client.get(&url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn story_detail(&self, id: u64) -> Result<StoryDetail, ApiError> {
        let url = format!("{}/stories/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/login", self.base_url);
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self.client.post(&url).json(&body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/register", self.base_url);
        let body = serde_json::json!({
            "username": username,
            "password": password,
            "email": email,
        });
        let response = self.client.post(&url).json(&body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn notifications(&self, token: &str) -> Result<Vec<Notification>, ApiError> {
        let url = format!("{}/notifications", self.base_url);
        let response = bearer(self.client.get(&url), token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn post_comment(
        &self,
        token: &str,
        story_id: u64,
        content: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/stories/{}/comments", self.base_url, story_id);
        let body = serde_json::json!({ "content": content });
        let response = bearer(self.client.post(&url), token).json(&body).send().await?;
        check(response).await?;
        Ok(())
    }

    pub async fn top_categories(&self, token: &str) -> Result<Vec<CategoryStat>, ApiError> {
        let url = format!("{}/user-top-categories", self.base_url);
        let response = bearer(self.client.get(&url), token).send().await?;
        let parsed: TopCategoriesResponse = check(response).await?.json().await?;
        Ok(parsed.categories)
    }

    pub async fn track_category_click(&self, token: &str, category: &str) -> Result<(), ApiError> {
        let url = format!("{}/track-category-click", self.base_url);
        let body = serde_json::json!({ "category": category });
        let response = bearer(self.client.post(&url), token).json(&body).send().await?;
        check(response).await?;
        Ok(())
    }
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", format!("Bearer {}", token))
}

/// Map non-success responses to typed errors. 401/403 become
/// `Unauthorized` so the sync layer can degrade the session; anything
/// else carries the server's own error text when it sends one.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Live-backend tests, run with `cargo test -- --ignored` against a
    // local archive server.

    #[tokio::test]
    #[ignore] // Requires a running archive server
    async fn test_list_stories_first_page() {
        let client = ApiClient::new(crate::constants::DEFAULT_API_BASE);
        let page = client.list_stories(1, 8).await.unwrap();
        assert_eq!(page.pagination.page, 1);
        assert!(page.stories.len() <= 8);
    }

    #[tokio::test]
    #[ignore] // Requires a running archive server
    async fn test_notifications_reject_bad_token() {
        let client = ApiClient::new(crate::constants::DEFAULT_API_BASE);
        let err = client.notifications("not-a-real-token").await.unwrap_err();
        assert!(err.is_auth());
    }
}
