//! Corpus ingestion: naming, decoding, parsing, catalog building, and
//! placeholder synthesis.
//!
//! The pipeline runs filename → raw bytes → decoded text → candidate verse
//! lines → chapters → catalog entries. Every stage tolerates bad input; the
//! recovery policy is synthesized placeholder content rather than a
//! user-facing failure.

pub mod catalog;
pub mod encoding;
pub mod names;
pub mod parser;
pub mod virtual_data;
