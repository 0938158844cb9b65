//! Injected dependencies: clock and id generation.
//!
//! Everything nondeterministic the workflows touch is behind a trait so the
//! tests can pin it down.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Clock abstraction.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of opaque record ids (purchases, sales, journal entries,
/// notifications).
pub trait IdSource: Send + Sync {
    /// A fresh opaque id.
    fn opaque_id(&self) -> String;
}

/// Production id source: random UUID v4, as the original records carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn opaque_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
