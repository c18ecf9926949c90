// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod schedule;
pub mod similarity;
pub mod vectorizer;

pub use filters::{check_eligibility, filter_candidates, FilterOutcome};
pub use matcher::{MatchOutcome, Matcher};
pub use similarity::{cosine_similarity, profile_document, rank_survivors};
pub use vectorizer::{tokenize, TermVector, TfidfVectorizer};
