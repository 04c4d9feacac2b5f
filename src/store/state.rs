//! The persisted social state document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Match, Message, ProfileExtras};

/// Client-local slice of the social graph, persisted as a single JSON
/// document.
///
/// Every field carries a serde default so documents written by older builds
/// keep loading after additive schema changes; removed or renamed fields are
/// not migrated.
///
/// `likes_given[u]` and `likes_received[v]` form a denormalized
/// bidirectional index and are always mutated together; matches are derived
/// from them, with the `matches` list as the only record of confirmation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialState {
    pub likes_given: HashMap<String, Vec<String>>,
    pub likes_received: HashMap<String, Vec<String>>,
    pub matches: Vec<Match>,
    pub messages: Vec<Message>,
    pub unread_by_user: HashMap<String, HashMap<String, u32>>,
    pub new_matches_by_user: HashMap<String, u32>,
    pub profile_extras_by_user: HashMap<String, ProfileExtras>,
}
