//! # pagelog-session
//!
//! Who is browsing and what they are looking at.
//!
//! ## Modules
//!
//! - `identity`: session identifier persisted in the session store
//! - `fingerprint`: stable low-entropy device/browser hash
//! - `state`: `Session` counters and the single-open-view `ViewTracker`

mod base36;
pub mod fingerprint;
pub mod identity;
pub mod state;

pub use base36::to_base36;
pub use fingerprint::{fingerprint_source, generate_fingerprint, rolling_hash};
pub use identity::{
    clear_session_id, generate_session_id, get_or_create_session_id, resolve_session_id,
    IdentityLookup,
};
pub use state::{Session, ViewTracker};
