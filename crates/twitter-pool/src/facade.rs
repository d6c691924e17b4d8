//! Pool-agnostic typed facade
//!
//! `PooledClient` exposes the wrapped client's operation surface as plain
//! methods; every call forwards through the router, so callers never see
//! slots, clocks, or rotation. Payloads come back exactly as the service
//! sent them, pagination metadata included, so caller-side paging works
//! against the facade the same as against a single raw client.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use twitter_client::{
    ApiRequest, IdCursor, SearchQuery, SearchResults, TimelineQuery, TokenSet, Transport, Tweet,
    User, UserRef, load_token_sets,
};

use crate::config::PoolConfig;
use crate::error::{Error, Result};
use crate::pool::Pool;
use crate::router::Router;

pub struct PooledClient {
    router: Router,
}

impl PooledClient {
    /// Connect a pool from inline credentials.
    pub async fn connect(credentials: &[TokenSet], config: &PoolConfig) -> Result<Self> {
        let pool = Pool::connect(credentials, config).await?;
        Ok(Self {
            router: Router::new(pool, config),
        })
    }

    /// Connect a pool from a JSON credential file.
    pub async fn connect_from_file(path: &Path, config: &PoolConfig) -> Result<Self> {
        let credentials = load_token_sets(path).await?;
        Self::connect(&credentials, config).await
    }

    /// Build a client over already connected handles.
    pub fn from_transports(transports: Vec<Box<dyn Transport>>, config: &PoolConfig) -> Result<Self> {
        let pool = Pool::from_transports(transports)?;
        Ok(Self {
            router: Router::new(pool, config),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.router.pool().len()
    }

    /// Recent tweets from one account's timeline.
    pub async fn user_timeline(&self, user: UserRef, page: TimelineQuery) -> Result<Vec<Tweet>> {
        self.typed(ApiRequest::UserTimeline { user, page }).await
    }

    /// Tweet search; paging metadata passes through verbatim.
    pub async fn search_tweets(
        &self,
        query: impl Into<String>,
        page: SearchQuery,
    ) -> Result<SearchResults> {
        self.typed(ApiRequest::SearchTweets {
            query: query.into(),
            page,
        })
        .await
    }

    /// One page of follower ids; `next_cursor == 0` means done.
    pub async fn follower_ids(&self, user: UserRef, cursor: Option<i64>) -> Result<IdCursor> {
        self.typed(ApiRequest::FollowerIds { user, cursor }).await
    }

    /// One page of friend ids.
    pub async fn friend_ids(&self, user: UserRef, cursor: Option<i64>) -> Result<IdCursor> {
        self.typed(ApiRequest::FriendIds { user, cursor }).await
    }

    /// Hydrate up to 100 users by id.
    pub async fn lookup_users(&self, user_ids: Vec<u64>) -> Result<Vec<User>> {
        self.typed(ApiRequest::LookupUsers { user_ids }).await
    }

    /// A single fully hydrated user.
    pub async fn show_user(&self, user: UserRef) -> Result<User> {
        self.typed(ApiRequest::ShowUser { user }).await
    }

    /// Route any request and hand back the raw payload untouched.
    pub async fn raw(&self, request: &ApiRequest) -> Result<Value> {
        self.router.dispatch(request).await
    }

    async fn typed<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let operation = request.operation();
        let value = self.router.dispatch(&request).await?;
        serde_json::from_value(value).map_err(|source| Error::Payload { operation, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryMode;
    use crate::test_utils::{ScriptedTransport, rate_limit_error};
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    fn tweets_payload() -> Value {
        json!([
            {"id": 1, "text": "first", "lang": "en"},
            {"id": 2, "text": "second"}
        ])
    }

    fn client_with(transports: Vec<Box<dyn Transport>>) -> PooledClient {
        PooledClient::from_transports(transports, &PoolConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn user_timeline_returns_typed_tweets() {
        let transport = ScriptedTransport::with_fallback(vec![], tweets_payload());
        let client = client_with(vec![Box::new(transport)]);

        let tweets = client
            .user_timeline(UserRef::Id(123), TimelineQuery::default())
            .await
            .unwrap();

        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[0].id, 1);
        assert_eq!(tweets[0].lang.as_deref(), Some("en"));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_slot_is_invisible_to_callers() {
        let throttled =
            ScriptedTransport::with_fallback(vec![Err(rate_limit_error())], tweets_payload());
        let fresh = ScriptedTransport::with_fallback(vec![], tweets_payload());
        let client = client_with(vec![Box::new(throttled), Box::new(fresh)]);
        let before = Instant::now();

        let tweets = client
            .user_timeline(UserRef::ScreenName("nytimes".into()), TimelineQuery::default())
            .await
            .unwrap();

        assert_eq!(tweets.len(), 2);
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn break_mode_propagates_through_the_facade() {
        let transport = ScriptedTransport::new(vec![Err(rate_limit_error())]);
        let config = PoolConfig {
            mode: RetryMode::Break,
            ..Default::default()
        };
        let client = PooledClient::from_transports(vec![Box::new(transport)], &config).unwrap();

        let err = client
            .user_timeline(UserRef::Id(1), TimelineQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::RateLimited(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn follower_ids_keeps_cursor_metadata() {
        let page = json!({
            "ids": [11, 12, 13],
            "next_cursor": 1374004777531007833i64,
            "previous_cursor": 0
        });
        let transport = ScriptedTransport::with_fallback(vec![], page);
        let client = client_with(vec![Box::new(transport)]);

        let cursor = client.follower_ids(UserRef::Id(7), None).await.unwrap();

        assert_eq!(cursor.ids, vec![11, 12, 13]);
        assert_eq!(cursor.next_cursor, 1374004777531007833);
    }

    #[tokio::test]
    async fn search_results_keep_next_results() {
        let payload = json!({
            "statuses": [{"id": 5, "text": "found"}],
            "search_metadata": {"next_results": "?max_id=4&q=rust", "count": 100}
        });
        let transport = ScriptedTransport::with_fallback(vec![], payload);
        let client = client_with(vec![Box::new(transport)]);

        let results = client
            .search_tweets("rust", SearchQuery::default())
            .await
            .unwrap();

        assert_eq!(results.statuses.len(), 1);
        assert_eq!(
            results.search_metadata.next_results.as_deref(),
            Some("?max_id=4&q=rust")
        );
    }

    #[tokio::test]
    async fn raw_passes_payload_through_unmodified() {
        let payload = json!({"anything": ["the", "service", "said"], "nested": {"n": 1}});
        let transport = ScriptedTransport::with_fallback(vec![], payload.clone());
        let client = client_with(vec![Box::new(transport)]);

        let value = client
            .raw(&ApiRequest::ShowUser {
                user: UserRef::Id(9),
            })
            .await
            .unwrap();

        assert_eq!(value, payload);
    }

    #[tokio::test]
    async fn mismatched_payload_is_a_payload_error() {
        let transport = ScriptedTransport::with_fallback(vec![], json!({"unexpected": true}));
        let client = client_with(vec![Box::new(transport)]);

        let err = client
            .user_timeline(UserRef::Id(1), TimelineQuery::default())
            .await
            .unwrap_err();

        match err {
            Error::Payload { operation, .. } => {
                assert_eq!(operation, "statuses/user_timeline");
            }
            other => panic!("expected Payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn requests_carry_their_operation_name() {
        let transport = ScriptedTransport::with_fallback(
            vec![],
            json!({"id": 3, "screen_name": "someone"}),
        );
        // Keep a handle on the transport to inspect recorded operations
        let transport = std::sync::Arc::new(transport);
        let probe = transport.clone();
        let client = client_with(vec![Box::new(ArcTransport(transport))]);

        client.show_user(UserRef::Id(3)).await.unwrap();

        assert_eq!(probe.operations(), vec!["users/show"]);
    }

    /// Forwarder so a test can keep a reference to the scripted transport
    /// after handing ownership to the pool.
    struct ArcTransport(std::sync::Arc<ScriptedTransport>);

    impl Transport for ArcTransport {
        fn execute<'a>(
            &'a self,
            request: &'a ApiRequest,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = twitter_client::Result<Value>> + Send + 'a>,
        > {
            self.0.execute(request)
        }

        fn auth_mode(&self) -> &'static str {
            self.0.auth_mode()
        }
    }
}
