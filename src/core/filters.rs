use crate::core::schedule::{within_days, within_minutes};
use crate::models::{
    GenderPreference, GuestTolerance, MatchingRules, Profile, Rejection, RejectionReason,
};

/// Survivors and rejections of one eligibility pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    /// Candidates that passed every rule, in input order
    pub survivors: Vec<Profile>,
    pub rejections: Vec<Rejection>,
}

/// Compare two optional values, skipping the rule when either side is absent
#[inline]
fn both_or_skip<T: Copy>(a: Option<T>, b: Option<T>, check: impl FnOnce(T, T) -> bool) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => check(a, b),
        _ => true,
    }
}

/// Gender compatibility
///
/// Two branches that are deliberately not symmetric:
/// - requester open to anyone: the candidate's own preference must be "any"
///   or admit the requester's declared gender.
/// - requester with a specific preference: the candidate must share the
///   requester's declared gender, and the candidate's preference must be
///   "any" or equal the requester's preference.
///
/// Unspecified components are skipped.
#[inline]
pub fn gender_compatible(requester: &Profile, candidate: &Profile) -> bool {
    let Some(wanted) = requester.gender_preference else {
        return true;
    };

    match wanted {
        GenderPreference::Any => match (candidate.gender_preference, requester.gender) {
            (Some(GenderPreference::Any), _) | (None, _) | (_, None) => true,
            (Some(theirs), Some(mine)) => theirs.accepts(mine),
        },
        specific => {
            let same_gender = both_or_skip(candidate.gender, requester.gender, |a, b| a == b);
            let preference_ok = candidate
                .gender_preference
                .map_or(true, |theirs| theirs == GenderPreference::Any || theirs == specific);
            same_gender && preference_ok
        }
    }
}

#[inline]
pub fn wake_up_compatible(requester: &Profile, candidate: &Profile, rules: &MatchingRules) -> bool {
    both_or_skip(requester.wake_up_time, candidate.wake_up_time, |a, b| {
        within_minutes(a, b, rules.wake_window_minutes)
    })
}

#[inline]
pub fn bedtime_compatible(requester: &Profile, candidate: &Profile, rules: &MatchingRules) -> bool {
    both_or_skip(requester.bed_time, candidate.bed_time, |a, b| {
        within_minutes(a, b, rules.bedtime_window_minutes)
    })
}

#[inline]
pub fn neatness_compatible(requester: &Profile, candidate: &Profile) -> bool {
    both_or_skip(requester.neatness, candidate.neatness, |a, b| a == b)
}

#[inline]
pub fn pets_compatible(requester: &Profile, candidate: &Profile) -> bool {
    both_or_skip(requester.pets, candidate.pets, |a, b| a == b)
}

/// Overnight guests: "yes" tolerates yes/sometimes, "no" only no,
/// "sometimes" anything but no
#[inline]
pub fn guests_compatible(requester: &Profile, candidate: &Profile) -> bool {
    both_or_skip(requester.overnight_guests, candidate.overnight_guests, |mine, theirs| {
        match mine {
            GuestTolerance::Yes => matches!(theirs, GuestTolerance::Yes | GuestTolerance::Sometimes),
            GuestTolerance::No => theirs == GuestTolerance::No,
            GuestTolerance::Sometimes => theirs != GuestTolerance::No,
        }
    })
}

#[inline]
pub fn move_in_compatible(requester: &Profile, candidate: &Profile, rules: &MatchingRules) -> bool {
    both_or_skip(requester.move_in_date, candidate.move_in_date, |a, b| {
        within_days(a, b, rules.move_date_window_days)
    })
}

#[inline]
pub fn move_out_compatible(requester: &Profile, candidate: &Profile, rules: &MatchingRules) -> bool {
    both_or_skip(requester.move_out_date, candidate.move_out_date, |a, b| {
        within_days(a, b, rules.move_date_window_days)
    })
}

/// Country, state and city must match exactly (case-sensitive)
#[inline]
pub fn location_compatible(requester: &Profile, candidate: &Profile) -> bool {
    let same = |a: &Option<String>, b: &Option<String>| match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };
    let (mine, theirs) = (&requester.location, &candidate.location);

    same(&mine.country, &theirs.country)
        && same(&mine.state, &theirs.state)
        && same(&mine.city, &theirs.city)
}

/// Run the nine rules in order and report the first one the candidate fails
pub fn check_eligibility(
    requester: &Profile,
    candidate: &Profile,
    rules: &MatchingRules,
) -> Result<(), RejectionReason> {
    if !gender_compatible(requester, candidate) {
        return Err(RejectionReason::GenderPreference);
    }
    if !wake_up_compatible(requester, candidate, rules) {
        return Err(RejectionReason::WakeUpTime);
    }
    if !bedtime_compatible(requester, candidate, rules) {
        return Err(RejectionReason::BedTime);
    }
    if !neatness_compatible(requester, candidate) {
        return Err(RejectionReason::Neatness);
    }
    if !pets_compatible(requester, candidate) {
        return Err(RejectionReason::Pets);
    }
    if !guests_compatible(requester, candidate) {
        return Err(RejectionReason::OvernightGuests);
    }
    if !move_in_compatible(requester, candidate, rules) {
        return Err(RejectionReason::MoveInDate);
    }
    if !move_out_compatible(requester, candidate, rules) {
        return Err(RejectionReason::MoveOutDate);
    }
    if !location_compatible(requester, candidate) {
        return Err(RejectionReason::Location);
    }
    Ok(())
}

/// Split candidates into survivors and rejections
///
/// Survivors keep the input order. Candidates are only read, never modified.
pub fn filter_candidates(
    requester: &Profile,
    candidates: Vec<Profile>,
    rules: &MatchingRules,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for candidate in candidates {
        match check_eligibility(requester, &candidate, rules) {
            Ok(()) => {
                tracing::debug!(
                    requester = %requester.email,
                    candidate = %candidate.email,
                    "Candidate passed eligibility filter"
                );
                outcome.survivors.push(candidate);
            }
            Err(reason) => {
                tracing::debug!(
                    requester = %requester.email,
                    candidate = %candidate.email,
                    reason = %reason,
                    "Candidate filtered out"
                );
                outcome.rejections.push(Rejection {
                    email: candidate.email,
                    reason,
                });
            }
        }
    }

    outcome
}
