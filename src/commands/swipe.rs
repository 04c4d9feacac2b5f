//! Swipe commands: like (right) and pass (left).

use clap::Args;

use matchbook::store::{LikeOutcome, SocialStore};

/// Like a user
#[derive(Args)]
pub struct LikeCommand {
    /// Target user id
    pub uid: String,
}

impl LikeCommand {
    pub fn run(&self, store: &SocialStore, me: &str) {
        match store.like(&self.uid, me) {
            LikeOutcome {
                matched: true,
                match_id: Some(id),
            } => println!("It's a match! Chat id: {}", id),
            _ => println!("Liked {}.", self.uid),
        }
    }
}

/// Pass on a user
#[derive(Args)]
pub struct PassCommand {
    /// Target user id
    pub uid: String,
}

impl PassCommand {
    pub fn run(&self, store: &SocialStore, me: &str) {
        store.pass(&self.uid, me);
        println!("Passed on {}.", self.uid);
    }
}
