use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::schedule::{format_date, format_time_of_day, parse_date, parse_time_of_day};

/// Errors raised while turning a raw storage record into a [`Profile`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Profile is missing an email address")]
    MissingEmail,

    #[error("Invalid {field} value: {value:?}")]
    InvalidEnum { field: &'static str, value: String },
}

/// Lowercases and folds `-`/`_` separators so "Very Neat", "very-neat" and
/// "very_neat" all compare equal.
fn normalize_choice(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect()
}

/// Declared gender of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ProfileError::InvalidEnum { field: "yourgender", value: s.to_string() }),
        }
    }
}

/// Which roommate gender a profile is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderPreference {
    Male,
    Female,
    Any,
}

impl GenderPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderPreference::Male => "Male",
            GenderPreference::Female => "Female",
            GenderPreference::Any => "Any",
        }
    }

    /// True when this preference admits someone of the given gender
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            GenderPreference::Any => true,
            GenderPreference::Male => gender == Gender::Male,
            GenderPreference::Female => gender == Gender::Female,
        }
    }
}

impl FromStr for GenderPreference {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "male" => Ok(GenderPreference::Male),
            "female" => Ok(GenderPreference::Female),
            "any" => Ok(GenderPreference::Any),
            _ => Err(ProfileError::InvalidEnum { field: "gender", value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neatness {
    VeryNeat,
    Neat,
    SomewhatNeat,
    Messy,
}

impl Neatness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Neatness::VeryNeat => "Very Neat",
            Neatness::Neat => "Neat",
            Neatness::SomewhatNeat => "Somewhat Neat",
            Neatness::Messy => "Messy",
        }
    }
}

impl FromStr for Neatness {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "very neat" => Ok(Neatness::VeryNeat),
            "neat" => Ok(Neatness::Neat),
            "somewhat neat" => Ok(Neatness::SomewhatNeat),
            "messy" => Ok(Neatness::Messy),
            _ => Err(ProfileError::InvalidEnum { field: "neatnessPreference", value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetTolerance {
    Yes,
    No,
}

impl PetTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetTolerance::Yes => "Yes",
            PetTolerance::No => "No",
        }
    }
}

impl FromStr for PetTolerance {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "yes" => Ok(PetTolerance::Yes),
            "no" => Ok(PetTolerance::No),
            _ => Err(ProfileError::InvalidEnum { field: "pets", value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestTolerance {
    Yes,
    No,
    Sometimes,
}

impl GuestTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestTolerance::Yes => "Yes",
            GuestTolerance::No => "No",
            GuestTolerance::Sometimes => "Sometimes",
        }
    }
}

impl FromStr for GuestTolerance {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "yes" => Ok(GuestTolerance::Yes),
            "no" => Ok(GuestTolerance::No),
            "sometimes" => Ok(GuestTolerance::Sometimes),
            _ => Err(ProfileError::InvalidEnum { field: "overnightGuests", value: s.to_string() }),
        }
    }
}

/// Where a profile is looking to live. Components may be unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Free-text answers used only for similarity ranking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeText {
    pub daily_routine: String,
    pub priorities: String,
    pub home_space_use: String,
    pub biggest_stressors: String,
    pub worst_habit: String,
    pub deal_breakers: String,
    pub confrontation_style: String,
    pub sunday_night_activity: String,
    pub roommate_self_assessment: String,
}

impl FreeText {
    /// The nine answers in their fixed document order
    pub fn fields(&self) -> [&str; 9] {
        [
            &self.daily_routine,
            &self.priorities,
            &self.home_space_use,
            &self.biggest_stressors,
            &self.worst_habit,
            &self.deal_breakers,
            &self.confrontation_style,
            &self.sunday_night_activity,
            &self.roommate_self_assessment,
        ]
    }
}

/// A fully typed, immutable roommate profile
///
/// Every hard-filter attribute is optional; an absent value skips the
/// corresponding eligibility rule instead of failing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub email: String,
    pub name: String,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub gender_preference: Option<GenderPreference>,
    pub wake_up_time: Option<NaiveTime>,
    pub bed_time: Option<NaiveTime>,
    pub neatness: Option<Neatness>,
    pub pets: Option<PetTolerance>,
    pub overnight_guests: Option<GuestTolerance>,
    pub move_in_date: Option<NaiveDate>,
    pub move_out_date: Option<NaiveDate>,
    pub location: Location,
    pub about: FreeText,
    pub images: Vec<String>,
}

/// Raw profile record as the storage layer and the HTTP API exchange it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    /// Declared gender
    #[serde(default)]
    pub yourgender: Option<String>,
    /// Gender preference
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "wakeUpTime", default)]
    pub wake_up_time: Option<String>,
    #[serde(rename = "bedTime", default)]
    pub bed_time: Option<String>,
    #[serde(rename = "neatnessPreference", default)]
    pub neatness_preference: Option<String>,
    #[serde(default)]
    pub pets: Option<String>,
    #[serde(rename = "overnightGuests", default)]
    pub overnight_guests: Option<String>,
    #[serde(rename = "moveInDate", default)]
    pub move_in_date: Option<String>,
    #[serde(rename = "moveOutDate", default)]
    pub move_out_date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "dailyRoutine", default)]
    pub daily_routine: Option<String>,
    #[serde(default)]
    pub priorities: Option<String>,
    #[serde(rename = "homeSpaceUse", default)]
    pub home_space_use: Option<String>,
    #[serde(rename = "biggestStressors", default)]
    pub biggest_stressors: Option<String>,
    #[serde(rename = "worstHabit", default)]
    pub worst_habit: Option<String>,
    #[serde(rename = "dealBreakers", default)]
    pub deal_breakers: Option<String>,
    #[serde(rename = "confrontationStyle", default)]
    pub confrontation_style: Option<String>,
    #[serde(rename = "sundayNightActivity", default)]
    pub sunday_night_activity: Option<String>,
    #[serde(rename = "roommateSelfAssessment", default)]
    pub roommate_self_assessment: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Blank means absent; anything else is kept verbatim for exact comparison
fn exact(value: &Option<String>) -> Option<String> {
    non_blank(value).and(value.clone())
}

fn parse_choice<T: FromStr<Err = ProfileError>>(value: &Option<String>) -> Result<Option<T>, ProfileError> {
    non_blank(value).map(str::parse::<T>).transpose()
}

/// Malformed times are treated as absent so one bad field never sinks a profile
fn lenient_time(email: &str, field: &str, value: &Option<String>) -> Option<NaiveTime> {
    let raw = non_blank(value)?;
    match parse_time_of_day(raw) {
        Ok(time) => Some(time),
        Err(e) => {
            tracing::warn!("Ignoring malformed {} {:?} for {}: {}", field, raw, email, e);
            None
        }
    }
}

fn lenient_date(email: &str, field: &str, value: &Option<String>) -> Option<NaiveDate> {
    let raw = non_blank(value)?;
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Ignoring malformed {} {:?} for {}: {}", field, raw, email, e);
            None
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        Profile::try_from(&record)
    }
}

impl TryFrom<&ProfileRecord> for Profile {
    type Error = ProfileError;

    fn try_from(record: &ProfileRecord) -> Result<Self, Self::Error> {
        let email = record.email.trim();
        if email.is_empty() {
            return Err(ProfileError::MissingEmail);
        }

        Ok(Profile {
            email: email.to_string(),
            name: record.name.clone(),
            age: record.age,
            gender: parse_choice(&record.yourgender)?,
            gender_preference: parse_choice(&record.gender)?,
            wake_up_time: lenient_time(email, "wakeUpTime", &record.wake_up_time),
            bed_time: lenient_time(email, "bedTime", &record.bed_time),
            neatness: parse_choice(&record.neatness_preference)?,
            pets: parse_choice(&record.pets)?,
            overnight_guests: parse_choice(&record.overnight_guests)?,
            move_in_date: lenient_date(email, "moveInDate", &record.move_in_date),
            move_out_date: lenient_date(email, "moveOutDate", &record.move_out_date),
            location: Location {
                country: exact(&record.country),
                state: exact(&record.state),
                city: exact(&record.city),
            },
            about: FreeText {
                daily_routine: text(&record.daily_routine),
                priorities: text(&record.priorities),
                home_space_use: text(&record.home_space_use),
                biggest_stressors: text(&record.biggest_stressors),
                worst_habit: text(&record.worst_habit),
                deal_breakers: text(&record.deal_breakers),
                confrontation_style: text(&record.confrontation_style),
                sunday_night_activity: text(&record.sunday_night_activity),
                roommate_self_assessment: text(&record.roommate_self_assessment),
            },
            images: record.images.clone(),
        })
    }
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        let about = &profile.about;
        ProfileRecord {
            email: profile.email.clone(),
            name: profile.name.clone(),
            age: profile.age,
            yourgender: profile.gender.map(|g| g.as_str().to_string()),
            gender: profile.gender_preference.map(|g| g.as_str().to_string()),
            wake_up_time: profile.wake_up_time.map(format_time_of_day),
            bed_time: profile.bed_time.map(format_time_of_day),
            neatness_preference: profile.neatness.map(|n| n.as_str().to_string()),
            pets: profile.pets.map(|p| p.as_str().to_string()),
            overnight_guests: profile.overnight_guests.map(|g| g.as_str().to_string()),
            move_in_date: profile.move_in_date.map(format_date),
            move_out_date: profile.move_out_date.map(format_date),
            country: profile.location.country.clone(),
            state: profile.location.state.clone(),
            city: profile.location.city.clone(),
            daily_routine: Some(about.daily_routine.clone()),
            priorities: Some(about.priorities.clone()),
            home_space_use: Some(about.home_space_use.clone()),
            biggest_stressors: Some(about.biggest_stressors.clone()),
            worst_habit: Some(about.worst_habit.clone()),
            deal_breakers: Some(about.deal_breakers.clone()),
            confrontation_style: Some(about.confrontation_style.clone()),
            sunday_night_activity: Some(about.sunday_night_activity.clone()),
            roommate_self_assessment: Some(about.roommate_self_assessment.clone()),
            images: profile.images.clone(),
        }
    }
}

/// Why a candidate was excluded by the eligibility filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    GenderPreference,
    WakeUpTime,
    BedTime,
    Neatness,
    Pets,
    OvernightGuests,
    MoveInDate,
    MoveOutDate,
    Location,
    /// The stored record could not be turned into a profile
    InvalidProfile(ProfileError),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::GenderPreference => write!(f, "Gender preference mismatch"),
            RejectionReason::WakeUpTime => write!(f, "Wake-up time mismatch"),
            RejectionReason::BedTime => write!(f, "Bedtime mismatch"),
            RejectionReason::Neatness => write!(f, "Neatness preference mismatch"),
            RejectionReason::Pets => write!(f, "Pet preference mismatch"),
            RejectionReason::OvernightGuests => write!(f, "Overnight guests preference mismatch"),
            RejectionReason::MoveInDate => write!(f, "Move-in date mismatch"),
            RejectionReason::MoveOutDate => write!(f, "Move-out date mismatch"),
            RejectionReason::Location => write!(f, "Location mismatch"),
            RejectionReason::InvalidProfile(e) => write!(f, "Invalid profile: {}", e),
        }
    }
}

/// A rejected candidate and the first rule it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub email: String,
    pub reason: RejectionReason,
}

/// A surviving candidate paired with its text similarity to the requester
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub profile: Profile,
    pub similarity: f64,
}

/// Thresholds for the proximity rules (all inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingRules {
    pub wake_window_minutes: i64,
    pub bedtime_window_minutes: i64,
    pub move_date_window_days: i64,
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            wake_window_minutes: 60,
            bedtime_window_minutes: 60,
            move_date_window_days: 14,
        }
    }
}

/// Decision attached to a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Yes,
    No,
}

impl FromStr for SwipeDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "yes" => Ok(SwipeDecision::Yes),
            "no" => Ok(SwipeDecision::No),
            other => Err(format!("Unknown swipe decision: {}", other)),
        }
    }
}
