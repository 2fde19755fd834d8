use serde::{Deserialize, Serialize};

/// One question as returned by the Stack Exchange search endpoint.
///
/// Every field is required; an item missing any of them fails the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_id: u64,
    pub title: String,
    pub link: String,
    pub score: i64,
    pub view_count: i64,
    pub is_answered: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Question>,
    #[serde(default)]
    pub has_more: bool,
    pub quota_remaining: Option<i64>,
    pub error_id: Option<i64>,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "items": [{
                "tags": ["twilio"],
                "question_id": 7811,
                "title": "Twilio webhook fails with 11200",
                "link": "https://stackoverflow.com/q/7811",
                "score": 3,
                "view_count": 120,
                "is_answered": false,
                "body": "<p>...</p>"
            }],
            "has_more": true,
            "quota_remaining": 297
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].question_id, 7811);
        assert_eq!(response.quota_remaining, Some(297));
        assert!(response.error_message.is_none());
    }

    #[test]
    fn test_missing_item_field_is_an_error() {
        let body = r#"{"items": [{"question_id": 1, "title": "x", "link": "y", "score": 0, "is_answered": true}]}"#;
        let err = serde_json::from_str::<SearchResponse>(body).unwrap_err();
        assert!(err.to_string().contains("view_count"));
    }

    #[test]
    fn test_error_payload_without_items() {
        let body = r#"{"error_id": 502, "error_name": "throttle_violation", "error_message": "too many requests from this IP"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.error_id, Some(502));
    }
}
