//! Session identifier persisted in the browsing-session store.

use chrono::{DateTime, Utc};
use pagelog_core::constants::SESSION_ID_KEY;
use pagelog_core::traits::{Clock, KeyValueStore};
use pagelog_events::epoch_millis;
use pagelog_observability::tracing_setup::events;

use crate::base36::to_base36;

const RANDOM_SUFFIX_LEN: usize = 8;

/// Outcome of a session id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityLookup {
    pub session_id: String,
    /// `true` when the id came from the store rather than being minted.
    pub reused: bool,
}

/// Base-36 millisecond timestamp, a dash, then a random suffix.
pub fn generate_session_id(now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}",
        to_base36(epoch_millis(now)),
        &random[..RANDOM_SUFFIX_LEN]
    )
}

/// Return the stored session id, or mint and persist a new one.
///
/// A failed write is logged and the fresh id is still returned; the next
/// call will simply mint another.
pub fn resolve_session_id(store: &mut dyn KeyValueStore, clock: &dyn Clock) -> IdentityLookup {
    if let Some(existing) = store.get(SESSION_ID_KEY).filter(|id| !id.is_empty()) {
        return IdentityLookup {
            session_id: existing,
            reused: true,
        };
    }

    let session_id = generate_session_id(clock.now());
    if let Err(e) = store.set(SESSION_ID_KEY, &session_id) {
        events::store_write_failed(SESSION_ID_KEY, &e.to_string());
    }
    IdentityLookup {
        session_id,
        reused: false,
    }
}

pub fn get_or_create_session_id(store: &mut dyn KeyValueStore, clock: &dyn Clock) -> String {
    resolve_session_id(store, clock).session_id
}

/// Forget the stored id so the next lookup mints a fresh one.
pub fn clear_session_id(store: &mut dyn KeyValueStore) {
    store.remove(SESSION_ID_KEY);
}
