//! Shared community data: profiles, public comments, daily verses.
//!
//! Everything in this module talks to the hosted backend; nothing here is
//! required for reading the corpus itself.

pub mod api;
pub mod types;

pub use api::{BackendClient, CommentSubscription};
