//! Matchbook Core Library
//!
//! A command-line prototype client for a dating application. The local
//! social store owns likes, matches, messages, unread counters, and profile
//! extras in a single JSON document; auth and discovery go through a thin
//! client for the remote API.

pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use config::{Config, ConfigError};
pub use models::{match_id, Match, Message, Profile, ProfileExtras, ProfileExtrasUpdate};
pub use session::{resolve_user_id, SessionError, SessionStore};
pub use store::{BadgeCounts, FileBackend, LikeOutcome, MemoryBackend, SocialStore, StateBackend};
