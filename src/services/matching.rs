use crate::core::{MatchOutcome, Matcher};
use crate::models::{Profile, ProfileError, ProfileRecord, SwipeDecision};
use crate::services::cache::CacheManager;
use crate::services::store::{ProfileStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the matching service
#[derive(Debug, Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Requester profile is invalid: {0}")]
    InvalidProfile(#[from] ProfileError),

    #[error("Only 'yes' decisions are processed.")]
    UnsupportedDecision,
}

/// Request-level matching: load profiles, run the pipeline, record swipes
pub struct MatchService<S: ProfileStore> {
    store: Arc<S>,
    cache: Option<Arc<CacheManager>>,
    matcher: Matcher,
}

impl<S: ProfileStore> MatchService<S> {
    pub fn new(store: Arc<S>, matcher: Matcher) -> Self {
        Self {
            store,
            cache: None,
            matcher,
        }
    }

    pub fn with_cache(mut self, cache: Arc<CacheManager>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find ranked roommate matches for the profile stored under `email`
    pub async fn find_matches(&self, email: &str) -> Result<MatchOutcome, MatchServiceError> {
        let record = self.load_requester(email).await?;
        let requester = Profile::try_from(record)?;

        let candidates = self.store.fetch_candidates(email).await?;

        tracing::debug!(
            "Matching {} against {} stored candidates",
            email,
            candidates.len()
        );

        Ok(self.matcher.find_matches_from_records(&requester, candidates))
    }

    /// Write a profile to the store, then drop any cached copy
    ///
    /// Hard-filter enums are checked first so an unreadable profile is never
    /// stored.
    pub async fn save_profile(&self, record: &ProfileRecord) -> Result<(), MatchServiceError> {
        Profile::try_from(record)?;

        self.store.upsert_profile(record).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_profile(&record.email).await {
                tracing::warn!("Profile cache invalidation failed for {}: {}", record.email, e);
            }
        }

        tracing::info!("Saved profile {}", record.email);
        Ok(())
    }

    /// Record a swipe; only "yes" decisions are kept
    pub async fn record_swipe(
        &self,
        liker: &str,
        liked: &str,
        decision: SwipeDecision,
    ) -> Result<(), MatchServiceError> {
        if decision != SwipeDecision::Yes {
            return Err(MatchServiceError::UnsupportedDecision);
        }

        self.store.record_like(liker, liked).await?;
        tracing::info!("Recorded swipe: {} -> {}", liker, liked);
        Ok(())
    }

    pub async fn liked_emails(&self, liker: &str) -> Result<Vec<String>, MatchServiceError> {
        // Unknown users get a NotFound rather than an empty list
        self.load_requester(liker).await?;
        Ok(self.store.liked_emails(liker).await?)
    }

    async fn load_requester(&self, email: &str) -> Result<ProfileRecord, StoreError> {
        if let Some(cache) = &self.cache {
            match cache.get_profile(email).await {
                Ok(Some(record)) => return Ok(record),
                Ok(None) => {}
                Err(e) => tracing::warn!("Profile cache read failed for {}: {}", email, e),
            }
        }

        let record = self.store.get_profile(email).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put_profile(&record).await {
                tracing::warn!("Profile cache write failed for {}: {}", email, e);
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RejectionReason;
    use crate::services::store::MemoryStore;

    fn record(email: &str, neatness: &str, routine: &str) -> ProfileRecord {
        ProfileRecord {
            email: email.to_string(),
            name: email.to_string(),
            neatness_preference: Some(neatness.to_string()),
            daily_routine: Some(routine.to_string()),
            ..Default::default()
        }
    }

    fn service(records: Vec<ProfileRecord>) -> MatchService<MemoryStore> {
        MatchService::new(Arc::new(MemoryStore::with_profiles(records)), Matcher::default())
    }

    #[tokio::test]
    async fn test_find_matches_excludes_requester() {
        let service = service(vec![
            record("me@example.com", "Neat", "yoga and coffee"),
            record("a@example.com", "Neat", "yoga and tea"),
            record("b@example.com", "Messy", "yoga and coffee"),
        ]);

        let outcome = service.find_matches("me@example.com").await.unwrap();

        assert_eq!(outcome.total_candidates(), 2);
        assert_eq!(outcome.matches().len(), 1);
        assert_eq!(outcome.matches()[0].profile.email, "a@example.com");
        assert_eq!(outcome.rejections()[0].reason, RejectionReason::Neatness);
    }

    #[tokio::test]
    async fn test_unknown_requester_is_not_found() {
        let service = service(vec![]);
        let err = service.find_matches("ghost@example.com").await.unwrap_err();
        assert!(matches!(err, MatchServiceError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_requester_profile() {
        let service = service(vec![record("me@example.com", "spotless", "")]);
        let err = service.find_matches("me@example.com").await.unwrap_err();
        assert!(matches!(err, MatchServiceError::InvalidProfile(_)));
    }

    #[tokio::test]
    async fn test_saved_profile_replaces_cached_requester() {
        let store = Arc::new(MemoryStore::with_profiles(vec![
            record("me@example.com", "Neat", "yoga"),
            record("a@example.com", "Messy", "yoga"),
        ]));
        let service = MatchService::new(store, Matcher::default())
            .with_cache(Arc::new(CacheManager::in_memory(100, 300)));

        // First lookup fills the cache with the "Neat" requester
        let before = service.find_matches("me@example.com").await.unwrap();
        assert!(matches!(before, MatchOutcome::NoSurvivors { .. }));
        assert_eq!(before.rejections()[0].reason, RejectionReason::Neatness);

        service
            .save_profile(&record("me@example.com", "Messy", "yoga"))
            .await
            .unwrap();

        let after = service.find_matches("me@example.com").await.unwrap();
        assert_eq!(after.matches().len(), 1);
        assert_eq!(after.matches()[0].profile.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_invalid_profile_is_not_saved() {
        let service = service(vec![record("me@example.com", "Neat", "")]);

        let err = service
            .save_profile(&record("me@example.com", "spotless", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchServiceError::InvalidProfile(_)));

        let stored = service.store().get_profile("me@example.com").await.unwrap();
        assert_eq!(stored.neatness_preference.as_deref(), Some("Neat"));
    }

    #[tokio::test]
    async fn test_swipes() {
        let service = service(vec![
            record("me@example.com", "Neat", ""),
            record("a@example.com", "Neat", ""),
        ]);

        service
            .record_swipe("me@example.com", "a@example.com", SwipeDecision::Yes)
            .await
            .unwrap();

        let duplicate = service
            .record_swipe("me@example.com", "a@example.com", SwipeDecision::Yes)
            .await
            .unwrap_err();
        assert!(matches!(
            duplicate,
            MatchServiceError::Store(StoreError::DuplicateSwipe { .. })
        ));

        let no = service
            .record_swipe("me@example.com", "a@example.com", SwipeDecision::No)
            .await
            .unwrap_err();
        assert!(matches!(no, MatchServiceError::UnsupportedDecision));

        assert_eq!(
            service.liked_emails("me@example.com").await.unwrap(),
            vec!["a@example.com"]
        );
    }
}
