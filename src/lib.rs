//! `malsseum` (말씀) - Korean Bible reading and shared meditation app data layer.
//!
//! This crate owns everything below the UI: ingesting the raw corpus files
//! (legacy encodings, inconsistent line formats) into an immutable catalog of
//! books, chapters and verses; layering personal highlights and notes on top;
//! and talking to the hosted backend for profiles, public comment threads and
//! the daily verse.

pub mod annotations;
pub mod bible;
pub mod community;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod error;
pub mod services;
pub mod types;
