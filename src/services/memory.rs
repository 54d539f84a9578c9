use crate::models::{canonical_pair, HackerProfile, MatchRecord, SwipeDirection, SwipeRecord};
use crate::services::ledger::{CommittedSwipe, LedgerError, SwipeStore};
use crate::services::profiles::{ProfileError, ProfileStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

/// In-memory profile store for tests and local development.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, HackerProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, profile: HackerProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }

    pub async fn remove(&self, user_id: &str) {
        self.profiles.write().await.remove(user_id);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, user_id: &str) -> Result<HackerProfile, ProfileError> {
        self.profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))
    }

    async fn get_eligible_profiles(
        &self,
        exclude_user_id: &str,
        exclude_target_ids: &[String],
    ) -> Result<Vec<HackerProfile>, ProfileError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .values()
            .filter(|p| p.user_id != exclude_user_id)
            .filter(|p| p.open_to_recruitment)
            .filter(|p| !exclude_target_ids.contains(&p.user_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct LedgerState {
    swipes: Vec<SwipeRecord>,
    matches: Vec<MatchRecord>,
}

/// In-memory swipe ledger.
///
/// A single mutex spans each whole commit/revert so the atomicity contract
/// matches the PostgreSQL implementation's transactions.
#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of match records currently held. Test hook.
    pub async fn match_count(&self) -> usize {
        self.state.lock().await.matches.len()
    }

    /// Number of swipe records currently held. Test hook.
    pub async fn swipe_count(&self) -> usize {
        self.state.lock().await.swipes.len()
    }
}

#[async_trait]
impl SwipeStore for MemoryLedger {
    async fn commit_swipe(
        &self,
        swiper_id: &str,
        target_id: &str,
        direction: SwipeDirection,
    ) -> Result<CommittedSwipe, LedgerError> {
        let mut state = self.state.lock().await;

        let duplicate = state
            .swipes
            .iter()
            .any(|s| s.swiper_id == swiper_id && s.target_id == target_id);
        if duplicate {
            return Err(LedgerError::DuplicateSwipe(
                swiper_id.to_string(),
                target_id.to_string(),
            ));
        }

        let record = SwipeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            swiper_id: swiper_id.to_string(),
            target_id: target_id.to_string(),
            direction,
            created_at: chrono::Utc::now(),
        };
        state.swipes.push(record.clone());

        let mut matched = None;
        if direction == SwipeDirection::Right {
            let reciprocal = state.swipes.iter().any(|s| {
                s.swiper_id == target_id
                    && s.target_id == swiper_id
                    && s.direction == SwipeDirection::Right
            });

            if reciprocal {
                let (user_a, user_b) = canonical_pair(swiper_id, target_id);
                let existing = state
                    .matches
                    .iter()
                    .find(|m| m.user_a_id == user_a && m.user_b_id == user_b)
                    .cloned();

                matched = Some(match existing {
                    Some(m) => m,
                    None => {
                        let m = MatchRecord {
                            id: uuid::Uuid::new_v4().to_string(),
                            user_a_id: user_a.to_string(),
                            user_b_id: user_b.to_string(),
                            created_at: chrono::Utc::now(),
                        };
                        state.matches.push(m.clone());
                        m
                    }
                });
            }
        }

        Ok(CommittedSwipe { record, matched })
    }

    async fn swiped_target_ids(&self, swiper_id: &str) -> Result<Vec<String>, LedgerError> {
        let state = self.state.lock().await;
        Ok(state
            .swipes
            .iter()
            .filter(|s| s.swiper_id == swiper_id)
            .map(|s| s.target_id.clone())
            .collect())
    }

    async fn revert_swipe(
        &self,
        record: &SwipeRecord,
        match_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;

        let position = state
            .swipes
            .iter()
            .position(|s| s.id == record.id)
            .ok_or_else(|| LedgerError::RecordNotFound(record.id.clone()))?;
        state.swipes.remove(position);

        if let Some(match_id) = match_id {
            state.matches.retain(|m| m.id != match_id);
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, LedgerError> {
        Ok(true)
    }
}
