use crate::models::HackerProfile;
use crate::services::cache::{CacheKey, CacheManager};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the profile service
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only access to hacker profiles.
///
/// The profile service owns the data; the engine only ever reads snapshots.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a single profile by user id.
    async fn get_profile(&self, user_id: &str) -> Result<HackerProfile, ProfileError>;

    /// Fetch the eligible candidate pool for a requester, excluding the
    /// requester themselves and the given already-swiped target ids.
    async fn get_eligible_profiles(
        &self,
        exclude_user_id: &str,
        exclude_target_ids: &[String],
    ) -> Result<Vec<HackerProfile>, ProfileError>;
}

/// HTTP client for the profile service
///
/// Handles all communication with the surrounding application's profile
/// backend: fetching single profiles and querying the eligible pool.
pub struct ProfileServiceClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ProfileServiceClient {
    /// Create a new profile service client
    pub fn new(base_url: String, api_key: String) -> Result<Self, ProfileError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl ProfileStore for ProfileServiceClient {
    async fn get_profile(&self, user_id: &str) -> Result<HackerProfile, ProfileError> {
        let url = format!(
            "{}/profiles/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProfileError::NotFound(user_id.to_string()));
        }

        if !response.status().is_success() {
            return Err(ProfileError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        serde_json::from_value(json)
            .map_err(|e| ProfileError::InvalidResponse(format!("Malformed profile document: {}", e)))
    }

    async fn get_eligible_profiles(
        &self,
        exclude_user_id: &str,
        exclude_target_ids: &[String],
    ) -> Result<Vec<HackerProfile>, ProfileError> {
        let exclude_ids = exclude_target_ids.join(",");
        let url = format!(
            "{}/profiles/eligible?excludeUserId={}&excludeIds={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(exclude_user_id),
            urlencoding::encode(&exclude_ids)
        );

        tracing::debug!(
            "Querying eligible profiles for {} (excluding {} targets)",
            exclude_user_id,
            exclude_target_ids.len()
        );

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProfileError::ApiError(format!(
                "Failed to query eligible profiles: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("profiles")
            .and_then(|p| p.as_array())
            .ok_or_else(|| ProfileError::InvalidResponse("Missing profiles array".into()))?;

        let profiles: Vec<HackerProfile> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        Ok(profiles)
    }
}

/// Cache-fronted profile store.
///
/// Single-profile reads go through the L1/L2 cache; eligible-pool queries
/// always hit the backend so queue refills see the latest store state.
pub struct CachedProfiles {
    inner: Arc<dyn ProfileStore>,
    cache: Arc<CacheManager>,
}

impl CachedProfiles {
    pub fn new(inner: Arc<dyn ProfileStore>, cache: Arc<CacheManager>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl ProfileStore for CachedProfiles {
    async fn get_profile(&self, user_id: &str) -> Result<HackerProfile, ProfileError> {
        let key = CacheKey::profile(user_id);

        if let Ok(profile) = self.cache.get::<HackerProfile>(&key).await {
            return Ok(profile);
        }

        let profile = self.inner.get_profile(user_id).await?;

        if let Err(e) = self.cache.set(&key, &profile).await {
            tracing::warn!("Failed to cache profile {}: {}", user_id, e);
        }

        Ok(profile)
    }

    async fn get_eligible_profiles(
        &self,
        exclude_user_id: &str,
        exclude_target_ids: &[String],
    ) -> Result<Vec<HackerProfile>, ProfileError> {
        self.inner
            .get_eligible_profiles(exclude_user_id, exclude_target_ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_profile_parses_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/profiles/alice")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "userId": "alice",
                    "name": "Alice",
                    "languages": ["Go", "Rust"],
                    "frameworks": ["Actix"],
                    "experience": "advanced",
                    "city": "Austin",
                    "state": "TX",
                    "openToRecruitment": true,
                    "github": {"stars": 42, "contributions": 300, "streak": 7}
                }"#,
            )
            .create_async()
            .await;

        let client = ProfileServiceClient::new(server.url(), "test-key".to_string()).unwrap();
        let profile = client.get_profile("alice").await.unwrap();

        assert_eq!(profile.user_id, "alice");
        assert_eq!(profile.languages, vec!["Go", "Rust"]);
        assert!(profile.has_github());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/profiles/ghost")
            .with_status(404)
            .create_async()
            .await;

        let client = ProfileServiceClient::new(server.url(), "test-key".to_string()).unwrap();
        let result = client.get_profile("ghost").await;

        assert!(matches!(result, Err(ProfileError::NotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_get_eligible_profiles_parses_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/profiles/eligible?excludeUserId=alice&excludeIds=bob",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"profiles": [
                    {"userId": "carol", "name": "Carol", "experience": "beginner",
                     "city": "Dallas", "state": "TX", "openToRecruitment": true}
                ]}"#,
            )
            .create_async()
            .await;

        let client = ProfileServiceClient::new(server.url(), "test-key".to_string()).unwrap();
        let profiles = client
            .get_eligible_profiles("alice", &["bob".to_string()])
            .await
            .unwrap();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].user_id, "carol");
    }
}
