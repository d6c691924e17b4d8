//! Typed read-only operation surface
//!
//! The remote surface here is bounded and known in advance, so operations
//! are an explicit enum rather than name-string dispatch. `operation()` is
//! the stable name rate limits are tracked under; `path()` and `query()`
//! produce the wire request.

use std::fmt;

/// Reference to an account, by numeric id or screen name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(u64),
    ScreenName(String),
}

impl UserRef {
    fn query_param(&self) -> (&'static str, String) {
        match self {
            UserRef::Id(id) => ("user_id", id.to_string()),
            UserRef::ScreenName(name) => ("screen_name", name.clone()),
        }
    }
}

/// Paging parameters for timeline reads.
#[derive(Debug, Clone, Default)]
pub struct TimelineQuery {
    pub count: Option<u32>,
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub include_rts: Option<bool>,
}

/// Parameters for tweet search.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub count: Option<u32>,
    pub max_id: Option<u64>,
    pub lang: Option<String>,
    pub result_type: Option<String>,
}

/// A read-only API operation with its arguments.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    UserTimeline { user: UserRef, page: TimelineQuery },
    SearchTweets { query: String, page: SearchQuery },
    FollowerIds { user: UserRef, cursor: Option<i64> },
    FriendIds { user: UserRef, cursor: Option<i64> },
    LookupUsers { user_ids: Vec<u64> },
    ShowUser { user: UserRef },
}

impl ApiRequest {
    /// Stable operation name; throttle state is tracked per name.
    pub fn operation(&self) -> &'static str {
        match self {
            ApiRequest::UserTimeline { .. } => "statuses/user_timeline",
            ApiRequest::SearchTweets { .. } => "search/tweets",
            ApiRequest::FollowerIds { .. } => "followers/ids",
            ApiRequest::FriendIds { .. } => "friends/ids",
            ApiRequest::LookupUsers { .. } => "users/lookup",
            ApiRequest::ShowUser { .. } => "users/show",
        }
    }

    /// Request path under the API host.
    pub fn path(&self) -> &'static str {
        match self {
            ApiRequest::UserTimeline { .. } => "/1.1/statuses/user_timeline.json",
            ApiRequest::SearchTweets { .. } => "/1.1/search/tweets.json",
            ApiRequest::FollowerIds { .. } => "/1.1/followers/ids.json",
            ApiRequest::FriendIds { .. } => "/1.1/friends/ids.json",
            ApiRequest::LookupUsers { .. } => "/1.1/users/lookup.json",
            ApiRequest::ShowUser { .. } => "/1.1/users/show.json",
        }
    }

    /// Query parameters in wire order.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        match self {
            ApiRequest::UserTimeline { user, page } => {
                params.push(user.query_param());
                push_opt(&mut params, "count", page.count);
                push_opt(&mut params, "since_id", page.since_id);
                push_opt(&mut params, "max_id", page.max_id);
                push_opt(&mut params, "include_rts", page.include_rts);
            }
            ApiRequest::SearchTweets { query, page } => {
                params.push(("q", query.clone()));
                push_opt(&mut params, "count", page.count);
                push_opt(&mut params, "max_id", page.max_id);
                push_opt(&mut params, "lang", page.lang.clone());
                push_opt(&mut params, "result_type", page.result_type.clone());
            }
            ApiRequest::FollowerIds { user, cursor } | ApiRequest::FriendIds { user, cursor } => {
                params.push(user.query_param());
                push_opt(&mut params, "cursor", *cursor);
            }
            ApiRequest::LookupUsers { user_ids } => {
                let joined = user_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                params.push(("user_id", joined));
            }
            ApiRequest::ShowUser { user } => {
                params.push(user.query_param());
            }
        }
        params
    }
}

fn push_opt<T: fmt::Display>(
    params: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: Option<T>,
) {
    if let Some(v) = value {
        params.push((name, v.to_string()));
    }
}
