//! Roommate Match - compatibility matching for prospective roommates
//!
//! Candidates first pass a fixed sequence of hard eligibility rules (gender
//! preference, schedules, habits, move dates, location). Survivors are then
//! ranked by TF-IDF cosine similarity of their free-text answers against the
//! requester's.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{check_eligibility, filter_candidates, rank_survivors, MatchOutcome, Matcher};
pub use models::{MatchResult, MatchingRules, Profile, ProfileRecord, Rejection, RejectionReason};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(*matcher.rules(), MatchingRules::default());
    }
}
