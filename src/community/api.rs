//! Client for the hosted backend (Supabase-style REST).
//!
//! Covers the shared stores the app depends on: user profiles, public
//! comments with likes, per-user meditation notes, and daily verse entries.
//! All operations are scoped to single rows or small filtered sets; nothing
//! here touches the parsed corpus.

use std::collections::HashMap;
use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::community::types::{CommentRow, DailyVerseRow, NoteRow, ProfileRow};
use crate::config::Config;
use crate::constants::backend::{COMMENT_POLL_SECS, REQUEST_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::types::{Comment, UserProfile, VerseKey};

/// Client for the hosted backend REST API.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client from config.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            anon_key: config.backend_anon_key.clone(),
            client: Client::builder()
                .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Check if credentials are configured
    fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.anon_key.is_empty()
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(Error::config(
                "Backend client not configured",
                "Set SUPABASE_URL and SUPABASE_ANON_KEY environment variables",
            ))
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Make an authenticated GET request with query parameters
    async fn get(&self, table: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.ensure_configured()?;
        let url = self.rest_url(table);
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {table} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::backend_status(
                format!("Request to {table} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from {table}: {e}"), None))
    }

    /// Make an authenticated POST request, asking for the inserted rows back
    async fn post(&self, table: &str, body: &Value, prefer: &str) -> Result<Value> {
        self.ensure_configured()?;
        let url = self.rest_url(table);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", prefer)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Insert into {table} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::backend_status(
                format!("Insert into {table} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from {table}: {e}"), None))
    }

    /// Make an authenticated PATCH request against a filtered row set
    async fn patch(&self, table: &str, query: &[(&str, &str)], body: &Value) -> Result<()> {
        self.ensure_configured()?;
        let url = self.rest_url(table);
        let resp = self
            .client
            .patch(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Update of {table} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::backend_status(
                format!("Update of {table} returned {status}"),
                status.as_u16(),
            ));
        }
        Ok(())
    }

    /// Make an authenticated DELETE request against a filtered row set
    async fn delete(&self, table: &str, query: &[(&str, &str)]) -> Result<()> {
        self.ensure_configured()?;
        let url = self.rest_url(table);
        let resp = self
            .client
            .delete(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Delete from {table} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::backend_status(
                format!("Delete from {table} returned {status}"),
                status.as_u16(),
            ));
        }
        Ok(())
    }

    /// Resolve a user id to their display profile.
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile> {
        let eq = format!("eq.{user_id}");
        let json = self
            .get("profiles", &[("id", eq.as_str()), ("select", "id,name,avatar_url")])
            .await?;
        let rows: Vec<ProfileRow> = serde_json::from_value(json)
            .map_err(|e| Error::parse(format!("Invalid profile row: {e}"), None))?;
        rows.into_iter()
            .next()
            .map(UserProfile::from)
            .ok_or_else(|| Error::backend_status(format!("No profile for user {user_id}"), 404))
    }

    /// Fetch the comments on a verse, newest first.
    pub async fn comments_for_verse(&self, verse_key: &VerseKey) -> Result<Vec<Comment>> {
        let eq = format!("eq.{verse_key}");
        let json = self
            .get(
                "comments",
                &[("verse_key", eq.as_str()), ("order", "created_at.desc")],
            )
            .await?;
        let rows: Vec<CommentRow> = serde_json::from_value(json)
            .map_err(|e| Error::parse(format!("Invalid comment rows: {e}"), None))?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Append a comment to a verse's thread and return the stored row.
    pub async fn add_comment(
        &self,
        user_id: &str,
        verse_key: &VerseKey,
        content: &str,
    ) -> Result<Comment> {
        let body = json!({
            "user_id": user_id,
            "verse_key": verse_key.as_str(),
            "content": content,
            "likes": [],
        });
        let json = self.post("comments", &body, "return=representation").await?;
        let rows: Vec<CommentRow> = serde_json::from_value(json)
            .map_err(|e| Error::parse(format!("Invalid inserted comment: {e}"), None))?;
        rows.into_iter()
            .next()
            .map(Comment::from)
            .ok_or_else(|| Error::backend("Insert returned no row"))
    }

    /// Replace the body of an existing comment.
    pub async fn update_comment(&self, comment_id: &str, content: &str) -> Result<()> {
        let eq = format!("eq.{comment_id}");
        self.patch("comments", &[("id", eq.as_str())], &json!({ "content": content }))
            .await
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let eq = format!("eq.{comment_id}");
        self.delete("comments", &[("id", eq.as_str())]).await
    }

    /// Toggle a user's like on a comment. Returns the new liked state.
    ///
    /// Read-modify-write over the liker id list; last writer wins, which
    /// matches the backend's column model.
    pub async fn toggle_like(&self, comment_id: &str, user_id: &str) -> Result<bool> {
        let eq = format!("eq.{comment_id}");
        let json = self
            .get("comments", &[("id", eq.as_str()), ("select", "likes")])
            .await?;
        let likes = json
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row["likes"].as_array())
            .map(|likes| {
                likes
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let liked = likes.iter().any(|id| id == user_id);
        let new_likes: Vec<String> = if liked {
            likes.into_iter().filter(|id| id != user_id).collect()
        } else {
            let mut likes = likes;
            likes.push(user_id.to_string());
            likes
        };

        self.patch("comments", &[("id", eq.as_str())], &json!({ "likes": new_likes }))
            .await?;
        Ok(!liked)
    }

    /// Per-verse comment counts for one chapter, aggregated client-side.
    pub async fn comment_counts(&self, book_id: &str, chapter: u32) -> Result<HashMap<String, u32>> {
        let like = format!("like.{book_id}-{chapter}-%");
        let json = self
            .get("comments", &[("verse_key", like.as_str()), ("select", "verse_key")])
            .await?;
        let rows = json
            .as_array()
            .ok_or_else(|| Error::parse("Expected an array of comment keys", None))?;

        let mut counts: HashMap<String, u32> = HashMap::new();
        for row in rows {
            if let Some(key) = row["verse_key"].as_str() {
                *counts.entry(key.to_string()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    /// Fetch all of a user's meditation notes, keyed by verse key.
    pub async fn user_notes(&self, user_id: &str) -> Result<HashMap<String, String>> {
        let eq = format!("eq.{user_id}");
        let json = self
            .get("notes", &[("user_id", eq.as_str()), ("select", "verse_key,content")])
            .await?;
        Self::notes_to_map(json)
    }

    /// Fetch a user's notes scoped to one chapter.
    pub async fn chapter_notes(
        &self,
        user_id: &str,
        book_id: &str,
        chapter: u32,
    ) -> Result<HashMap<String, String>> {
        let eq = format!("eq.{user_id}");
        let like = format!("like.{book_id}-{chapter}-%");
        let json = self
            .get(
                "notes",
                &[
                    ("user_id", eq.as_str()),
                    ("verse_key", like.as_str()),
                    ("select", "verse_key,content"),
                ],
            )
            .await?;
        Self::notes_to_map(json)
    }

    fn notes_to_map(json: Value) -> Result<HashMap<String, String>> {
        let rows: Vec<NoteRow> = serde_json::from_value(json)
            .map_err(|e| Error::parse(format!("Invalid note rows: {e}"), None))?;
        Ok(rows.into_iter().map(|r| (r.verse_key, r.content)).collect())
    }

    /// Save a note for a verse; an empty note deletes the stored row.
    pub async fn save_note(&self, user_id: &str, verse_key: &VerseKey, content: &str) -> Result<()> {
        let user_eq = format!("eq.{user_id}");
        let key_eq = format!("eq.{verse_key}");
        if content.trim().is_empty() {
            return self
                .delete(
                    "notes",
                    &[("user_id", user_eq.as_str()), ("verse_key", key_eq.as_str())],
                )
                .await;
        }

        let body = json!({
            "user_id": user_id,
            "verse_key": verse_key.as_str(),
            "content": content,
        });
        self.post("notes", &body, "resolution=merge-duplicates").await?;
        Ok(())
    }

    /// Today's daily verse entry, falling back to the most recent one.
    pub async fn today_verse(&self, today: NaiveDate) -> Result<Option<DailyVerseRow>> {
        if let Some(row) = self.verse_row_by_date(today).await? {
            return Ok(Some(row));
        }
        tracing::debug!("no daily verse for {today}, falling back to the latest entry");
        let rows = self.recent_verse_rows(1).await?;
        Ok(rows.into_iter().next())
    }

    /// The daily verse entry for a specific date, if one exists.
    pub async fn verse_row_by_date(&self, date: NaiveDate) -> Result<Option<DailyVerseRow>> {
        let eq = format!("eq.{date}");
        let json = self.get("daily_verses", &[("date", eq.as_str())]).await?;
        let rows: Vec<DailyVerseRow> = serde_json::from_value(json)
            .map_err(|e| Error::parse(format!("Invalid daily verse rows: {e}"), None))?;
        Ok(rows.into_iter().next())
    }

    /// The most recent daily verse entries, newest first.
    pub async fn recent_verse_rows(&self, limit: usize) -> Result<Vec<DailyVerseRow>> {
        let limit = limit.to_string();
        let json = self
            .get(
                "daily_verses",
                &[("order", "date.desc"), ("limit", limit.as_str())],
            )
            .await?;
        serde_json::from_value(json)
            .map_err(|e| Error::parse(format!("Invalid daily verse rows: {e}"), None))
    }

    /// Subscribe to newly inserted comments on a verse.
    ///
    /// Push-style interface: new comments arrive on the returned channel in
    /// insertion order. Delivery is poll-backed; dropping the subscription
    /// stops the background task.
    #[must_use]
    pub fn subscribe_comments(&self, verse_key: VerseKey) -> CommentSubscription {
        let (tx, rx) = mpsc::channel(16);
        let client = self.clone();

        let handle = tokio::spawn(async move {
            let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
            let mut primed = false;
            let mut interval = tokio::time::interval(StdDuration::from_secs(COMMENT_POLL_SECS));

            loop {
                interval.tick().await;
                let comments = match client.comments_for_verse(&verse_key).await {
                    Ok(comments) => comments,
                    Err(e) => {
                        tracing::warn!("comment poll for {verse_key} failed: {e}");
                        continue;
                    }
                };

                // Oldest first so deliveries preserve insertion order.
                for comment in comments.into_iter().rev() {
                    let is_new = seen.insert(comment.id.clone());
                    if is_new && primed && tx.send(comment).await.is_err() {
                        return;
                    }
                }
                primed = true;
            }
        });

        CommentSubscription { receiver: rx, handle }
    }
}

/// A live subscription to one verse's comment thread.
pub struct CommentSubscription {
    receiver: mpsc::Receiver<Comment>,
    handle: JoinHandle<()>,
}

impl CommentSubscription {
    /// Receive the next newly inserted comment, or `None` once the
    /// subscription has ended.
    pub async fn recv(&mut self) -> Option<Comment> {
        self.receiver.recv().await
    }
}

impl Drop for CommentSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn unconfigured_client() -> BackendClient {
        BackendClient::new(&Config::default())
    }

    #[tokio::test]
    async fn test_unconfigured_client_errors_with_hint() {
        let client = unconfigured_client();
        let err = client.comments_for_verse(&VerseKey::new("창세기", 1, 1)).await;
        match err {
            Err(Error::Config { hint, .. }) => assert!(hint.contains("SUPABASE_URL")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_empty_note_requires_config_too() {
        let client = unconfigured_client();
        let result = client.save_note("u1", &VerseKey::new("창세기", 1, 1), "  ").await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
