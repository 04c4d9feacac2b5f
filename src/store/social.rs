//! The social store: single source of truth for likes, matches, messages,
//! unread counters, and profile extras.
//!
//! Every operation is a synchronous read-modify-write of the whole document.
//! The public surface never fails: missing or corrupt persisted data loads
//! as the empty skeleton, and failed saves are logged and dropped, so the
//! store stays callable in contexts where persistence is unavailable.

use serde::Serialize;
use tracing::warn;

use super::backend::StateBackend;
use super::state::SocialState;
use crate::models::{match_id, Match, Message, ProfileExtras, ProfileExtrasUpdate};

/// Aggregate unseen-activity counters for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BadgeCounts {
    pub total: u32,
    pub matches: u32,
    pub messages: u32,
}

/// Result of a swipe-right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeOutcome {
    pub matched: bool,
    pub match_id: Option<String>,
}

pub struct SocialStore {
    backend: Box<dyn StateBackend>,
}

impl SocialStore {
    pub fn new(backend: Box<dyn StateBackend>) -> Self {
        Self { backend }
    }

    /// Loads the current document, falling back to the empty skeleton when
    /// nothing is persisted or the persisted value does not parse.
    fn load(&self) -> SocialState {
        let raw = match self.backend.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return SocialState::default(),
            Err(e) => {
                warn!("failed to read social state, starting empty: {}", e);
                return SocialState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("corrupt social state, starting empty: {}", e);
                SocialState::default()
            }
        }
    }

    /// Persists the document. Failures are logged and dropped.
    fn persist(&self, state: &SocialState) {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to serialize social state: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.save(&raw) {
            warn!("failed to persist social state: {}", e);
        }
    }

    /// Unseen-activity counters for `uid`. Unknown users get all zeros.
    pub fn badges(&self, uid: &str) -> BadgeCounts {
        let state = self.load();
        let matches = state.new_matches_by_user.get(uid).copied().unwrap_or(0);
        let messages = state
            .unread_by_user
            .get(uid)
            .map(|per_match| per_match.values().sum())
            .unwrap_or(0);
        BadgeCounts {
            total: matches + messages,
            matches,
            messages,
        }
    }

    /// Zeroes the unseen-match counter for `uid`. Idempotent.
    pub fn clear_new_matches(&self, uid: &str) {
        let mut state = self.load();
        state.new_matches_by_user.insert(uid.to_string(), 0);
        self.persist(&state);
    }

    /// Zeroes the unread counter `uid` holds for one match. Idempotent.
    pub fn clear_unread_for_match(&self, uid: &str, match_id: &str) {
        let mut state = self.load();
        state
            .unread_by_user
            .entry(uid.to_string())
            .or_default()
            .insert(match_id.to_string(), 0);
        self.persist(&state);
    }

    /// All matches involving `uid`, most recently active first.
    pub fn matches_for(&self, uid: &str) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .load()
            .matches
            .into_iter()
            .filter(|m| m.involves(uid))
            .collect();
        matches.sort_by(|x, y| y.activity_at().cmp(&x.activity_at()));
        matches
    }

    /// Looks up a single match by id.
    pub fn find_match(&self, match_id: &str) -> Option<Match> {
        self.load().matches.into_iter().find(|m| m.id == match_id)
    }

    /// All messages in a thread, oldest first.
    pub fn messages(&self, match_id: &str) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .load()
            .messages
            .into_iter()
            .filter(|m| m.match_id == match_id)
            .collect();
        messages.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        messages
    }

    /// Appends a message and bumps the recipient's unread counter.
    ///
    /// When the match record exists its `last_message_at`/`last_message_text`
    /// preview fields are refreshed. A `match_id` with no match record is
    /// tolerated: the message is still stored and the unread counter still
    /// moves, only the preview update is skipped. Empty text is permitted.
    pub fn send_message(
        &self,
        match_id: &str,
        from_uid: &str,
        to_uid: &str,
        text: &str,
    ) -> Message {
        let mut state = self.load();
        let message = Message::new(match_id, from_uid, text);

        if let Some(record) = state.matches.iter_mut().find(|m| m.id == match_id) {
            record.last_message_at = Some(message.created_at);
            record.last_message_text = Some(message.preview());
        }

        *state
            .unread_by_user
            .entry(to_uid.to_string())
            .or_default()
            .entry(match_id.to_string())
            .or_insert(0) += 1;

        state.messages.push(message.clone());
        self.persist(&state);
        message
    }

    /// Free-form profile fields for `uid`, empty when never set.
    pub fn profile_extras(&self, uid: &str) -> ProfileExtras {
        self.load()
            .profile_extras_by_user
            .get(uid)
            .cloned()
            .unwrap_or_default()
    }

    /// Shallow-merges `update` into the stored extras and returns the
    /// merged record.
    pub fn set_profile_extras(&self, uid: &str, update: ProfileExtrasUpdate) -> ProfileExtras {
        let mut state = self.load();
        let extras = state
            .profile_extras_by_user
            .entry(uid.to_string())
            .or_default();
        extras.apply(update);
        let merged = extras.clone();
        self.persist(&state);
        merged
    }

    /// Records a directed like and confirms a match when the target already
    /// liked back.
    ///
    /// Both directional indices are deduplicated; liking the same target
    /// twice has no further effect. The match record and both new-match
    /// counters move only when the match is first created, but a repeat
    /// reciprocal like still reports `matched: true` with the canonical id.
    pub fn like(&self, target_uid: &str, my_uid: &str) -> LikeOutcome {
        let mut state = self.load();

        let given = state.likes_given.entry(my_uid.to_string()).or_default();
        if !given.iter().any(|u| u == target_uid) {
            given.push(target_uid.to_string());
        }
        let received = state
            .likes_received
            .entry(target_uid.to_string())
            .or_default();
        if !received.iter().any(|u| u == my_uid) {
            received.push(my_uid.to_string());
        }

        let reciprocal = state
            .likes_given
            .get(target_uid)
            .is_some_and(|likes| likes.iter().any(|u| u == my_uid));

        let outcome = if reciprocal {
            let id = match_id(target_uid, my_uid);
            if !state.matches.iter().any(|m| m.id == id) {
                state.matches.push(Match::new(target_uid, my_uid));
                for uid in [my_uid, target_uid] {
                    *state.new_matches_by_user.entry(uid.to_string()).or_insert(0) += 1;
                }
            }
            LikeOutcome {
                matched: true,
                match_id: Some(id),
            }
        } else {
            LikeOutcome {
                matched: false,
                match_id: None,
            }
        };

        self.persist(&state);
        outcome
    }

    /// Swiping left is not recorded anywhere yet.
    pub fn pass(&self, _target_uid: &str, _my_uid: &str) {}

    /// Deletes the entire persisted document.
    pub fn reset_all(&self) {
        if let Err(e) = self.backend.clear() {
            warn!("failed to reset social state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{FileBackend, MemoryBackend, StorageError};
    use tempfile::TempDir;

    fn test_store() -> SocialStore {
        SocialStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn test_unknown_user_has_zero_badges() {
        let store = test_store();
        assert_eq!(store.badges("nobody"), BadgeCounts::default());
    }

    #[test]
    fn test_one_directional_like_does_not_match() {
        let store = test_store();
        let outcome = store.like("u2", "u1");
        assert!(!outcome.matched);
        assert_eq!(outcome.match_id, None);
        assert!(store.matches_for("u1").is_empty());
        assert_eq!(store.badges("u2"), BadgeCounts::default());
    }

    #[test]
    fn test_mutual_like_creates_one_match() {
        let store = test_store();
        store.like("u2", "u1");
        let outcome = store.like("u1", "u2");

        assert!(outcome.matched);
        assert_eq!(outcome.match_id.as_deref(), Some("match_u1_u2"));

        let matches = store.matches_for("u1");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "match_u1_u2");
        assert_eq!(store.badges("u1").matches, 1);
        assert_eq!(store.badges("u2").matches, 1);
    }

    #[test]
    fn test_repeat_likes_do_not_duplicate() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");

        // Liking again in either direction still reports the match but
        // creates nothing and bumps no counters.
        let again = store.like("u1", "u2");
        assert!(again.matched);
        assert_eq!(again.match_id.as_deref(), Some("match_u1_u2"));
        let reverse = store.like("u2", "u1");
        assert!(reverse.matched);

        assert_eq!(store.matches_for("u1").len(), 1);
        assert_eq!(store.badges("u1").matches, 1);
        assert_eq!(store.badges("u2").matches, 1);
    }

    #[test]
    fn test_clear_new_matches_is_idempotent() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");

        store.clear_new_matches("u1");
        assert_eq!(store.badges("u1").matches, 0);
        store.clear_new_matches("u1");
        assert_eq!(store.badges("u1").matches, 0);
        // The other side is untouched.
        assert_eq!(store.badges("u2").matches, 1);
    }

    #[test]
    fn test_messages_are_append_only_and_ascending() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");

        for i in 0..5 {
            store.send_message("match_u1_u2", "u1", "u2", &format!("msg {}", i));
        }

        let messages = store.messages("match_u1_u2");
        assert_eq!(messages.len(), 5);
        for window in messages.windows(2) {
            assert!(window[0].created_at <= window[1].created_at);
        }
        assert_eq!(messages[0].text, "msg 0");
        assert_eq!(messages[4].text, "msg 4");
    }

    #[test]
    fn test_send_message_updates_preview_and_unread() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");

        let long_text = "a".repeat(120);
        let message = store.send_message("match_u1_u2", "u1", "u2", &long_text);
        assert_eq!(message.text, long_text);

        let record = store.find_match("match_u1_u2").unwrap();
        assert_eq!(record.last_message_at, Some(message.created_at));
        assert_eq!(record.last_message_text.unwrap().chars().count(), 80);

        assert_eq!(store.badges("u2").messages, 1);
        assert_eq!(store.badges("u1").messages, 0);
    }

    #[test]
    fn test_send_message_empty_text_permitted() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");

        let message = store.send_message("match_u1_u2", "u1", "u2", "");
        assert_eq!(message.text, "");
        assert_eq!(store.messages("match_u1_u2").len(), 1);
    }

    #[test]
    fn test_orphan_message_is_tolerated() {
        let store = test_store();

        let message = store.send_message("match_ghost", "u1", "u2", "anyone there?");
        assert_eq!(message.match_id, "match_ghost");

        // Stored and counted, but no match record appears.
        assert_eq!(store.messages("match_ghost").len(), 1);
        assert_eq!(store.badges("u2").messages, 1);
        assert!(store.find_match("match_ghost").is_none());
    }

    #[test]
    fn test_clear_unread_leaves_other_matches_alone() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");
        store.like("u3", "u1");
        store.like("u1", "u3");

        store.send_message("match_u1_u2", "u2", "u1", "hey");
        store.send_message("match_u1_u3", "u3", "u1", "hello");

        store.clear_unread_for_match("u1", "match_u1_u2");

        let badges = store.badges("u1");
        assert_eq!(badges.messages, 1);

        // Idempotent, including for users with no unread map yet.
        store.clear_unread_for_match("u1", "match_u1_u2");
        store.clear_unread_for_match("u9", "match_u1_u2");
        assert_eq!(store.badges("u1").messages, 1);
    }

    #[test]
    fn test_matches_sorted_by_recent_activity() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");
        store.like("u3", "u1");
        store.like("u1", "u3");

        // u1's newest match is with u3, but a message makes u2's thread the
        // most recently active.
        store.send_message("match_u1_u2", "u2", "u1", "bumping this thread");

        let matches = store.matches_for("u1");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "match_u1_u2");
        assert_eq!(matches[1].id, "match_u1_u3");
    }

    #[test]
    fn test_profile_extras_merge() {
        let store = test_store();
        assert_eq!(store.profile_extras("u1"), ProfileExtras::default());

        store.set_profile_extras(
            "u1",
            ProfileExtrasUpdate {
                headline: Some("hello".to_string()),
                ..Default::default()
            },
        );
        let merged = store.set_profile_extras(
            "u1",
            ProfileExtrasUpdate {
                zip: Some("97201".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(merged.headline.as_deref(), Some("hello"));
        assert_eq!(merged.zip.as_deref(), Some("97201"));
        assert_eq!(store.profile_extras("u1"), merged);
    }

    #[test]
    fn test_pass_has_no_observable_effect() {
        let store = test_store();
        store.pass("u2", "u1");

        assert!(store.matches_for("u1").is_empty());
        assert_eq!(store.badges("u1"), BadgeCounts::default());
        // A later reciprocal like is unaffected by the earlier pass.
        store.like("u2", "u1");
        assert!(!store.like("u2", "u1").matched);
    }

    #[test]
    fn test_reset_wipes_everything() {
        let store = test_store();
        store.like("u2", "u1");
        store.like("u1", "u2");
        store.send_message("match_u1_u2", "u1", "u2", "hi");

        store.reset_all();

        assert!(store.matches_for("u1").is_empty());
        assert!(store.messages("match_u1_u2").is_empty());
        assert_eq!(store.badges("u2"), BadgeCounts::default());
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("social.json");

        {
            let store = SocialStore::new(Box::new(FileBackend::new(path.clone())));
            store.like("u2", "u1");
            store.like("u1", "u2");
            store.send_message("match_u1_u2", "u1", "u2", "hi");
        }

        let reopened = SocialStore::new(Box::new(FileBackend::new(path)));
        assert_eq!(reopened.matches_for("u1").len(), 1);
        assert_eq!(reopened.messages("match_u1_u2").len(), 1);
        assert_eq!(
            reopened.badges("u2"),
            BadgeCounts {
                total: 2,
                matches: 1,
                messages: 1
            }
        );
    }

    #[test]
    fn test_corrupt_state_loads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("social.json");
        std::fs::write(&path, "this is not json {]").unwrap();

        let store = SocialStore::new(Box::new(FileBackend::new(path)));
        assert!(store.matches_for("u1").is_empty());
        assert_eq!(store.badges("u1"), BadgeCounts::default());

        // The store recovers: mutations work on the fresh skeleton.
        store.like("u2", "u1");
        assert!(store.like("u1", "u2").matched);
    }

    struct FailingBackend;

    impl StateBackend for FailingBackend {
        fn load(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn save(&self, _raw: &str) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }
    }

    #[test]
    fn test_unavailable_storage_never_panics() {
        let store = SocialStore::new(Box::new(FailingBackend));

        let outcome = store.like("u2", "u1");
        assert!(!outcome.matched);
        let message = store.send_message("m", "u1", "u2", "hi");
        assert_eq!(message.text, "hi");
        assert_eq!(store.badges("u1"), BadgeCounts::default());
        store.reset_all();
    }

    #[test]
    fn test_two_user_scenario() {
        let store = test_store();

        let first = store.like("u2", "u1");
        assert!(!first.matched);

        let second = store.like("u1", "u2");
        assert!(second.matched);
        assert_eq!(second.match_id.as_deref(), Some("match_u1_u2"));

        let matches = store.matches_for("u1");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "match_u1_u2");

        store.send_message("match_u1_u2", "u1", "u2", "hi");
        assert_eq!(
            store.badges("u2"),
            BadgeCounts {
                total: 2,
                matches: 1,
                messages: 1
            }
        );
    }
}
