mod matching;
mod message;
mod profile;

pub use matching::{match_id, Match};
pub use message::{Message, PREVIEW_LEN};
pub use profile::{Profile, ProfileExtras, ProfileExtrasUpdate, RawProfile};
