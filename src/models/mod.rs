// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FreeText, Gender, GenderPreference, GuestTolerance, Location, MatchResult, MatchingRules,
    Neatness, PetTolerance, Profile, ProfileError, ProfileRecord, Rejection, RejectionReason,
    SwipeDecision,
};
pub use requests::{FindMatchesRequest, LikesQuery, RecordSwipeRequest};
pub use responses::{
    ErrorResponse, FindMatchesResponse, HealthResponse, LikesResponse, RecordSwipeResponse,
    RejectionView, SaveProfileResponse, SimilarUser,
};
