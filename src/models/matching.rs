use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A confirmed mutual like between two users.
///
/// The identifier is deterministic over the unordered pair, so two users can
/// never hold more than one match between them. Matches are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub a: String,
    pub b: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_text: Option<String>,
}

impl Match {
    /// Creates a match between two users. Participants are stored sorted so
    /// the pair has a single on-disk representation.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        let (x, y) = (x.into(), y.into());
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self {
            id: match_id(&a, &b),
            a,
            b,
            created_at: Utc::now(),
            last_message_at: None,
            last_message_text: None,
        }
    }

    /// Returns true when `uid` is one of the participants.
    pub fn involves(&self, uid: &str) -> bool {
        self.a == uid || self.b == uid
    }

    /// The participant that is not `uid`, when `uid` is part of the match.
    pub fn other(&self, uid: &str) -> Option<&str> {
        if self.a == uid {
            Some(&self.b)
        } else if self.b == uid {
            Some(&self.a)
        } else {
            None
        }
    }

    /// Sort key for most-recently-active-first listings.
    pub fn activity_at(&self) -> DateTime<Utc> {
        self.last_message_at.unwrap_or(self.created_at)
    }
}

/// Canonical match identifier for an unordered pair of users.
pub fn match_id(x: &str, y: &str) -> String {
    let (a, b) = if x <= y { (x, y) } else { (y, x) };
    format!("match_{}_{}", a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_order_independent() {
        assert_eq!(match_id("u1", "u2"), "match_u1_u2");
        assert_eq!(match_id("u2", "u1"), "match_u1_u2");
    }

    #[test]
    fn test_new_sorts_participants() {
        let m = Match::new("zoe", "adam");
        assert_eq!(m.a, "adam");
        assert_eq!(m.b, "zoe");
        assert_eq!(m.id, "match_adam_zoe");
    }

    #[test]
    fn test_involves_and_other() {
        let m = Match::new("u1", "u2");
        assert!(m.involves("u1"));
        assert!(m.involves("u2"));
        assert!(!m.involves("u3"));
        assert_eq!(m.other("u1"), Some("u2"));
        assert_eq!(m.other("u3"), None);
    }

    #[test]
    fn test_activity_prefers_last_message() {
        let mut m = Match::new("u1", "u2");
        assert_eq!(m.activity_at(), m.created_at);

        let later = m.created_at + chrono::Duration::seconds(60);
        m.last_message_at = Some(later);
        assert_eq!(m.activity_at(), later);
    }

    #[test]
    fn test_serializes_camel_case() {
        let m = Match::new("u1", "u2");
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("createdAt").is_some());
        // Unset preview fields stay off the wire entirely.
        assert!(json.get("lastMessageAt").is_none());
    }
}
