use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find roommate matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(email)]
    pub email: String,
}

/// Request to record a swipe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordSwipeRequest {
    #[validate(email)]
    #[serde(alias = "swiped_by_email", rename = "swipedByEmail")]
    pub swiped_by_email: String,
    #[validate(email)]
    #[serde(alias = "swiped_user_email", rename = "swipedUserEmail")]
    pub swiped_user_email: String,
    #[serde(default = "default_decision")]
    pub decision: String,
}

fn default_decision() -> String {
    "yes".to_string()
}

/// Query string for listing a user's likes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikesQuery {
    #[validate(email)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_request_accepts_both_casings() {
        let camel: RecordSwipeRequest = serde_json::from_str(
            r#"{"swipedByEmail":"a@example.com","swipedUserEmail":"b@example.com","decision":"yes"}"#,
        )
        .unwrap();
        let snake: RecordSwipeRequest = serde_json::from_str(
            r#"{"swiped_by_email":"a@example.com","swiped_user_email":"b@example.com"}"#,
        )
        .unwrap();

        assert_eq!(camel.swiped_by_email, snake.swiped_by_email);
        assert_eq!(snake.decision, "yes");
    }

    #[test]
    fn test_invalid_email_fails_validation() {
        let req = FindMatchesRequest { email: "not-an-email".to_string() };
        assert!(req.validate().is_err());
    }
}
