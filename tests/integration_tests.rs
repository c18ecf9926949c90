// Integration tests for the roommate matching pipeline and service

use roommate_match::core::{MatchOutcome, Matcher};
use roommate_match::models::{Profile, ProfileRecord, RejectionReason, SwipeDecision};
use roommate_match::services::{MatchService, MatchServiceError, MemoryStore, StoreError};
use std::sync::Arc;

fn create_test_record(email: &str, wake: &str, routine: &str) -> ProfileRecord {
    ProfileRecord {
        email: email.to_string(),
        name: format!("User {}", email),
        age: Some(23),
        yourgender: Some("Female".to_string()),
        gender: Some("Any".to_string()),
        wake_up_time: Some(wake.to_string()),
        bed_time: Some("23:00".to_string()),
        neatness_preference: Some("Neat".to_string()),
        pets: Some("No".to_string()),
        overnight_guests: Some("Sometimes".to_string()),
        move_in_date: Some("2024-09-01".to_string()),
        move_out_date: Some("2025-05-31".to_string()),
        country: Some("USA".to_string()),
        state: Some("MA".to_string()),
        city: Some("Boston".to_string()),
        daily_routine: Some(routine.to_string()),
        ..Default::default()
    }
}

fn create_test_profile(email: &str, wake: &str, routine: &str) -> Profile {
    Profile::try_from(create_test_record(email, wake, routine)).unwrap()
}

#[test]
fn test_integration_end_to_end_matching() {
    let matcher = Matcher::default();
    let requester = create_test_profile("me", "07:00", "morning yoga then coffee and lectures");

    let candidates = vec![
        create_test_profile("1", "07:45", "morning yoga then coffee and lectures"),
        create_test_profile("2", "09:15", "morning yoga then coffee and lectures"),
        create_test_profile("3", "06:30", "late gaming sessions"),
        create_test_profile("4", "07:00", "coffee and lectures"),
    ];

    let outcome = matcher.find_matches(&requester, candidates);

    let emails: Vec<_> = outcome.matches().iter().map(|m| m.profile.email.as_str()).collect();
    assert_eq!(emails, vec!["1", "4", "3"]);

    assert_eq!(outcome.rejections().len(), 1);
    assert_eq!(outcome.rejections()[0].email, "2");
    assert_eq!(outcome.rejections()[0].reason.to_string(), "Wake-up time mismatch");

    // Survivors plus rejections account for every candidate
    assert_eq!(outcome.matches().len() + outcome.rejections().len(), outcome.total_candidates());

    for window in outcome.matches().windows(2) {
        assert!(window[0].similarity >= window[1].similarity);
    }
    for m in outcome.matches() {
        assert!((0.0..=1.0).contains(&m.similarity));
    }
}

#[test]
fn test_identical_texts_tie_and_keep_input_order() {
    let matcher = Matcher::default();
    let requester = create_test_profile("me", "07:00", "quiet reader who cooks");

    let candidates = vec![
        create_test_profile("first", "07:00", "quiet reader who cooks"),
        create_test_profile("second", "07:00", "quiet reader who cooks"),
    ];

    let outcome = matcher.find_matches(&requester, candidates);
    let matches = outcome.matches();

    assert_eq!(matches[0].profile.email, "first");
    assert_eq!(matches[1].profile.email, "second");
    assert_eq!(matches[0].similarity, matches[1].similarity);
    assert!((matches[0].similarity - 1.0).abs() < 1e-9);
}

#[test]
fn test_no_shared_vocabulary_still_included() {
    let matcher = Matcher::default();
    let requester = create_test_profile("me", "07:00", "climbing bouldering");

    let outcome = matcher.find_matches(
        &requester,
        vec![create_test_profile("1", "07:00", "knitting crochet")],
    );

    assert_eq!(outcome.matches().len(), 1);
    assert_eq!(outcome.matches()[0].similarity, 0.0);
}

#[test]
fn test_matching_is_idempotent() {
    let matcher = Matcher::default();
    let requester = create_test_profile("me", "07:00", "hiking cooking board games");
    let candidates = vec![
        create_test_profile("1", "07:30", "board games and cooking"),
        create_test_profile("2", "08:00", "hiking trips"),
        create_test_profile("3", "07:10", "movies"),
    ];

    let first = matcher.find_matches(&requester, candidates.clone());
    let second = matcher.find_matches(&requester, candidates);

    assert_eq!(first, second);
}

#[test]
fn test_each_rejection_has_one_reason() {
    let matcher = Matcher::default();
    let requester = create_test_profile("me", "07:00", "");

    let mut messy_late = create_test_profile("a", "11:00", "");
    messy_late.neatness = Some(roommate_match::models::Neatness::Messy);
    let mut elsewhere = create_test_profile("b", "07:00", "");
    elsewhere.location.city = Some("Chicago".to_string());

    let outcome = matcher.find_matches(&requester, vec![messy_late, elsewhere]);

    assert!(matches!(outcome, MatchOutcome::NoSurvivors { total_candidates: 2, .. }));
    let reasons: Vec<_> = outcome.rejections().iter().map(|r| r.reason.clone()).collect();
    assert_eq!(reasons, vec![RejectionReason::WakeUpTime, RejectionReason::Location]);
}

#[tokio::test]
async fn test_service_flow_with_memory_store() {
    let store = Arc::new(MemoryStore::with_profiles(vec![
        create_test_record("me@example.com", "07:00", "yoga coffee"),
        create_test_record("near@example.com", "07:30", "yoga coffee"),
        create_test_record("far@example.com", "10:00", "yoga coffee"),
    ]));
    let service = MatchService::new(store, Matcher::default());

    let outcome = service.find_matches("me@example.com").await.unwrap();
    assert_eq!(outcome.total_candidates(), 2);
    assert_eq!(outcome.matches()[0].profile.email, "near@example.com");

    service
        .record_swipe("me@example.com", "near@example.com", SwipeDecision::Yes)
        .await
        .unwrap();
    let err = service
        .record_swipe("me@example.com", "near@example.com", SwipeDecision::Yes)
        .await
        .unwrap_err();
    assert!(matches!(err, MatchServiceError::Store(StoreError::DuplicateSwipe { .. })));

    assert_eq!(
        service.liked_emails("me@example.com").await.unwrap(),
        vec!["near@example.com"]
    );
}

#[tokio::test]
async fn test_service_concurrent_duplicate_swipes() {
    let store = Arc::new(MemoryStore::with_profiles(vec![
        create_test_record("a@example.com", "07:00", ""),
        create_test_record("b@example.com", "07:00", ""),
    ]));
    let service = MatchService::new(store, Matcher::default());

    let swipe = || service.record_swipe("a@example.com", "b@example.com", SwipeDecision::Yes);
    let (r1, r2, r3, r4) = tokio::join!(swipe(), swipe(), swipe(), swipe());

    let accepted = [r1, r2, r3, r4].iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    assert_eq!(service.liked_emails("a@example.com").await.unwrap().len(), 1);
}
