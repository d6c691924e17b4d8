//! Slots and pool construction
//!
//! A slot is one connected client handle plus its per-operation throttle
//! clock. The pool is an ordered sequence of slots built once at startup;
//! afterwards the only mutation anywhere in it is clock stamping. Order
//! matters solely as the deterministic tie-break during selection.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{info, warn};

use twitter_client::{ApiRequest, RestClient, TokenSet, Transport};

use crate::config::PoolConfig;
use crate::error::{Error, Result};

/// One credentialed client handle plus its throttle clock.
///
/// Clock entries map operation name → the instant of this slot's last
/// observed rate-limit response for that operation. An absent entry means
/// never throttled. Entries are only ever written forward in time and
/// never removed; staleness is handled by the wait computation, not by
/// deletion.
pub struct Slot {
    transport: Box<dyn Transport>,
    throttle_clock: Mutex<HashMap<&'static str, Instant>>,
}

impl Slot {
    fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            throttle_clock: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) async fn throttled_at(&self, operation: &'static str) -> Option<Instant> {
        self.throttle_clock.lock().await.get(operation).copied()
    }

    /// Stamp the clock for an operation with the current instant.
    pub(crate) async fn mark_throttled(&self, operation: &'static str) {
        self.throttle_clock
            .lock()
            .await
            .insert(operation, Instant::now());
    }

    pub(crate) async fn execute(
        &self,
        request: &ApiRequest,
    ) -> twitter_client::Result<serde_json::Value> {
        self.transport.execute(request).await
    }

    pub(crate) fn auth_mode(&self) -> &'static str {
        self.transport.auth_mode()
    }
}

/// Ordered, fixed sequence of slots.
pub struct Pool {
    slots: Vec<Slot>,
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl Pool {
    /// Connect a pool from credentials: one user-context slot per token
    /// set, then (when `app_auth` is on) one application-only slot per
    /// token set, appended after all user slots so indices stay stable.
    ///
    /// Handshakes run to completion one at a time and any failure is
    /// fatal: a rejected credential is a configuration problem, not a
    /// transient condition.
    pub async fn connect(credentials: &[TokenSet], config: &PoolConfig) -> Result<Self> {
        if credentials.is_empty() {
            return Err(Error::Empty);
        }
        let http = reqwest::Client::new();
        let mut transports: Vec<Box<dyn Transport>> = Vec::new();
        for credential in credentials {
            let client =
                RestClient::connect_user(http.clone(), &config.api_base, credential.clone())
                    .await
                    .map_err(|e| {
                        warn!(auth = "user", error = %e, "credential handshake failed");
                        e
                    })?;
            transports.push(Box::new(client));
        }
        if config.app_auth {
            for credential in credentials {
                let client = RestClient::connect_app(http.clone(), &config.api_base, credential)
                    .await
                    .map_err(|e| {
                        warn!(auth = "app", error = %e, "credential handshake failed");
                        e
                    })?;
                transports.push(Box::new(client));
            }
        }
        Self::from_transports(transports)
    }

    /// Build a pool from already connected handles. Every slot starts
    /// with an empty throttle clock.
    pub fn from_transports(transports: Vec<Box<dyn Transport>>) -> Result<Self> {
        if transports.is_empty() {
            return Err(Error::Empty);
        }
        info!(slots = transports.len(), "pool initialized");
        Ok(Self {
            slots: transports.into_iter().map(Slot::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    /// Pick the slot with the oldest throttle stamp for `operation`.
    ///
    /// Absent entries order before any stamp, so never-throttled slots
    /// win outright; ties break toward the lowest index. Returns the
    /// winning index and its stamp.
    pub(crate) async fn least_throttled(&self, operation: &'static str) -> (usize, Option<Instant>) {
        let mut best_index = 0;
        let mut best_stamp = self.slots[0].throttled_at(operation).await;
        for (index, slot) in self.slots.iter().enumerate().skip(1) {
            let stamp = slot.throttled_at(operation).await;
            if stamp < best_stamp {
                best_index = index;
                best_stamp = stamp;
            }
        }
        (best_index, best_stamp)
    }
}
