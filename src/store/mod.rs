//! Local social store: the client-local slice of the social graph.

mod backend;
mod social;
mod state;

pub use backend::{FileBackend, MemoryBackend, StateBackend, StorageError};
pub use social::{BadgeCounts, LikeOutcome, SocialStore};
pub use state::SocialState;
