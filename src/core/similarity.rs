use crate::core::vectorizer::{TermVector, TfidfVectorizer};
use crate::models::{MatchResult, Profile};
use std::cmp::Ordering;

/// Join the nine free-text answers into one document, in a fixed order
pub fn profile_document(profile: &Profile) -> String {
    profile.about.fields().join(" ")
}

/// Cosine similarity of two term vectors, clamped to [0, 1]
///
/// A zero vector on either side scores 0.0.
#[inline]
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    (a.dot(b) / (a.norm() * b.norm())).clamp(0.0, 1.0)
}

/// Rank survivors by text similarity to the requester, highest first
///
/// The vector space is fitted on the requester plus the current survivors
/// only, so scores for the same pair can shift as the pool changes. Ties
/// keep their input order.
pub fn rank_survivors(requester: &Profile, survivors: Vec<Profile>) -> Vec<MatchResult> {
    if survivors.is_empty() {
        return Vec::new();
    }

    let corpus: Vec<String> = std::iter::once(requester)
        .chain(survivors.iter())
        .map(profile_document)
        .collect();

    let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&corpus);
    let (requester_vector, survivor_vectors) = vectors.split_at(1);

    tracing::trace!(
        requester = %requester.email,
        vocabulary = vectorizer.vocabulary_len(),
        documents = corpus.len(),
        "Fitted similarity vector space"
    );

    let mut ranked: Vec<MatchResult> = survivors
        .into_iter()
        .zip(survivor_vectors)
        .map(|(profile, vector)| {
            let similarity = cosine_similarity(&requester_vector[0], vector);
            tracing::debug!(
                requester = %requester.email,
                candidate = %profile.email,
                similarity,
                "Scored survivor"
            );
            MatchResult { profile, similarity }
        })
        .collect();

    // sort_by is stable, so equal scores keep input order
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });

    ranked
}
