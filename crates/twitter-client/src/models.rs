//! Response payload models
//!
//! Deserialization is tolerant: only fields this workspace consumes are
//! declared, optional ones default, unknown fields are ignored. Pagination
//! metadata is carried through untouched so callers can drive cursor and
//! max_id paging themselves, exactly as against a raw client.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub friends_count: Option<u64>,
    #[serde(default)]
    pub protected: bool,
}

/// One page of a cursored id listing (followers/ids, friends/ids).
///
/// `next_cursor == 0` means the listing is exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct IdCursor {
    pub ids: Vec<u64>,
    pub next_cursor: i64,
    pub previous_cursor: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    pub statuses: Vec<Tweet>,
    pub search_metadata: SearchMetadata,
}

/// Search paging metadata, passed through verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub max_id: Option<u64>,
    #[serde(default)]
    pub next_results: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub completed_in: Option<f64>,
}
