use crate::models::ProfileRecord;
use std::collections::HashSet;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur in the profile storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{liked} has already been swiped 'yes' by {liker}")]
    DuplicateSwipe { liker: String, liked: String },
}

/// Lookup capability over stored profiles and swipes
///
/// The matching pipeline only ever reads through this trait; profile writes
/// go through `MatchService::save_profile` so cached copies are dropped.
#[allow(async_fn_in_trait)]
pub trait ProfileStore: Send + Sync {
    /// Fetch one profile by email
    async fn get_profile(&self, email: &str) -> Result<ProfileRecord, StoreError>;

    /// Insert a profile, replacing any existing one with the same email
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError>;

    /// Every profile except `excluding`, in a stable storage order
    async fn fetch_candidates(&self, excluding: &str) -> Result<Vec<ProfileRecord>, StoreError>;

    /// Record that `liker` swiped yes on `liked`
    ///
    /// Recording the same pair twice yields [`StoreError::DuplicateSwipe`].
    async fn record_like(&self, liker: &str, liked: &str) -> Result<(), StoreError>;

    /// Emails `liker` has swiped yes on, oldest first
    async fn liked_emails(&self, liker: &str) -> Result<Vec<String>, StoreError>;

    async fn is_healthy(&self) -> bool {
        true
    }
}

/// In-process store for tests and local runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<Vec<ProfileRecord>>,
    likes: RwLock<LikeLog>,
}

/// Liked pairs, unique by (liker, liked), plus their insertion order
#[derive(Debug, Default)]
struct LikeLog {
    pairs: HashSet<(String, String)>,
    ordered: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<ProfileRecord>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            ..Default::default()
        }
    }

    async fn exists(&self, email: &str) -> bool {
        self.profiles.read().await.iter().any(|p| p.email == email)
    }
}

impl ProfileStore for MemoryStore {
    async fn get_profile(&self, email: &str) -> Result<ProfileRecord, StoreError> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.email == email)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(email.to_string()))
    }

    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        match profiles.iter_mut().find(|p| p.email == record.email) {
            Some(existing) => *existing = record.clone(),
            None => profiles.push(record.clone()),
        }
        Ok(())
    }

    async fn fetch_candidates(&self, excluding: &str) -> Result<Vec<ProfileRecord>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .filter(|p| p.email != excluding)
            .cloned()
            .collect())
    }

    async fn record_like(&self, liker: &str, liked: &str) -> Result<(), StoreError> {
        for email in [liker, liked] {
            if !self.exists(email).await {
                return Err(StoreError::NotFound(email.to_string()));
            }
        }

        let key = (liker.to_string(), liked.to_string());
        let mut likes = self.likes.write().await;
        if !likes.pairs.insert(key.clone()) {
            return Err(StoreError::DuplicateSwipe {
                liker: key.0,
                liked: key.1,
            });
        }
        likes.ordered.push(key);
        Ok(())
    }

    async fn liked_emails(&self, liker: &str) -> Result<Vec<String>, StoreError> {
        let likes = self.likes.read().await;
        Ok(likes
            .ordered
            .iter()
            .filter(|(by, _)| by == liker)
            .map(|(_, liked)| liked.clone())
            .collect())
    }
}
