//! Service modules layered over the corpus snapshot.

pub mod daily;
pub mod search;
