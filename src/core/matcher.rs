use crate::core::{filters::filter_candidates, similarity::rank_survivors};
use crate::models::{MatchResult, MatchingRules, Profile, ProfileRecord, Rejection, RejectionReason};

/// Result of one matching run
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// At least one candidate survived filtering
    Ranked {
        matches: Vec<MatchResult>,
        rejections: Vec<Rejection>,
        total_candidates: usize,
    },
    /// Every candidate was rejected, or there were none
    NoSurvivors {
        rejections: Vec<Rejection>,
        total_candidates: usize,
    },
}

impl MatchOutcome {
    pub fn matches(&self) -> &[MatchResult] {
        match self {
            MatchOutcome::Ranked { matches, .. } => matches,
            MatchOutcome::NoSurvivors { .. } => &[],
        }
    }

    pub fn rejections(&self) -> &[Rejection] {
        match self {
            MatchOutcome::Ranked { rejections, .. } | MatchOutcome::NoSurvivors { rejections, .. } => {
                rejections
            }
        }
    }

    pub fn total_candidates(&self) -> usize {
        match self {
            MatchOutcome::Ranked { total_candidates, .. }
            | MatchOutcome::NoSurvivors { total_candidates, .. } => *total_candidates,
        }
    }

    pub fn has_survivors(&self) -> bool {
        matches!(self, MatchOutcome::Ranked { .. })
    }
}

/// Matching orchestrator - runs the eligibility filter, then ranks survivors
///
/// # Pipeline Stages
/// 1. Hard eligibility rules (first failing rule rejects)
/// 2. TF-IDF similarity ranking over survivors only
///
/// Holds no mutable state; every call builds its own vector space.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    rules: MatchingRules,
}

impl Matcher {
    pub fn new(rules: MatchingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &MatchingRules {
        &self.rules
    }

    /// Find and rank compatible roommates for the requester
    ///
    /// # Arguments
    /// * `requester` - The profile asking for matches
    /// * `candidates` - Every other profile, in storage order
    pub fn find_matches(&self, requester: &Profile, candidates: Vec<Profile>) -> MatchOutcome {
        self.run(requester, candidates, Vec::new())
    }

    /// Same as [`Matcher::find_matches`], starting from raw storage records
    ///
    /// Records that fail to convert are recorded as rejections instead of
    /// failing the batch.
    pub fn find_matches_from_records(
        &self,
        requester: &Profile,
        records: Vec<ProfileRecord>,
    ) -> MatchOutcome {
        let mut candidates = Vec::with_capacity(records.len());
        let mut rejections = Vec::new();

        for record in records {
            match Profile::try_from(&record) {
                Ok(profile) => candidates.push(profile),
                Err(e) => {
                    tracing::warn!("Rejecting unreadable profile {}: {}", record.email, e);
                    rejections.push(Rejection {
                        email: record.email,
                        reason: RejectionReason::InvalidProfile(e),
                    });
                }
            }
        }

        self.run(requester, candidates, rejections)
    }

    fn run(
        &self,
        requester: &Profile,
        candidates: Vec<Profile>,
        mut rejections: Vec<Rejection>,
    ) -> MatchOutcome {
        let total_candidates = candidates.len() + rejections.len();

        let filtered = filter_candidates(requester, candidates, &self.rules);
        rejections.extend(filtered.rejections);

        if filtered.survivors.is_empty() {
            tracing::info!(
                "No survivors for {} ({} candidates, {} rejected)",
                requester.email,
                total_candidates,
                rejections.len()
            );
            return MatchOutcome::NoSurvivors {
                rejections,
                total_candidates,
            };
        }

        let matches = rank_survivors(requester, filtered.survivors);

        tracing::info!(
            "Ranked {} matches for {} ({} candidates, {} rejected)",
            matches.len(),
            requester.email,
            total_candidates,
            rejections.len()
        );

        MatchOutcome::Ranked {
            matches,
            rejections,
            total_candidates,
        }
    }
}
