//! Per-visitor session storage for the web front end.
//!
//! The store maps an opaque [`SessionId`] to a serialized string. The game
//! engine never sees it; the web handlers decode a [`VisitorSession`] from the
//! stored value, work on it, and write it back.

use crate::games::tictactoe::{BOARD_SIZE, GameState, Mark, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Length of a generated session identifier in hex characters.
const SESSION_ID_LEN: usize = 32;

/// How long an untouched session is kept by default.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// How many sessions are kept by default before the least recently used goes.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Opaque identifier for one visitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh identifier from 128 random bits.
    pub fn generate() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    /// Accepts an identifier received from a client.
    ///
    /// Only values shaped like generated identifiers are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        (raw.len() == SESSION_ID_LEN && raw.chars().all(|c| c.is_ascii_hexdigit()))
            .then(|| Self(raw.to_ascii_lowercase()))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key-value storage for serialized visitor sessions.
///
/// Any backend works as long as `update` runs its read-modify-write without
/// another `update` for the same id slipping in between.
pub trait SessionStore: Send + Sync {
    /// Reads the stored value.
    fn get(&self, id: &SessionId) -> Option<String>;

    /// Replaces the stored value.
    fn put(&self, id: &SessionId, value: String);

    /// True when a value is stored under `id`.
    fn contains(&self, id: &SessionId) -> bool {
        self.get(id).is_some()
    }

    /// Reads, transforms, and writes back one value.
    ///
    /// `f` receives the current value and returns the one to store, or `None`
    /// to leave the store untouched.
    fn update(&self, id: &SessionId, f: &mut dyn FnMut(Option<String>) -> Option<String>) {
        if let Some(next) = f(self.get(id)) {
            self.put(id, next);
        }
    }
}

#[derive(Debug)]
struct StoredSession {
    value: String,
    touched: Instant,
    last_use: u64,
}

/// Sessions plus a use counter for picking the least recently used entry.
#[derive(Debug, Default)]
struct SessionTable {
    entries: HashMap<SessionId, StoredSession>,
    uses: u64,
}

impl SessionTable {
    /// Reads and touches a live entry. Expired entries are dropped.
    fn read(&mut self, id: &SessionId, ttl: Duration) -> Option<String> {
        let now = Instant::now();
        if self
            .entries
            .get(id)
            .is_some_and(|entry| now.duration_since(entry.touched) >= ttl)
        {
            debug!(session_id = %id, "Session expired");
            self.entries.remove(id);
            return None;
        }

        self.uses += 1;
        let uses = self.uses;
        self.entries.get_mut(id).map(|entry| {
            entry.touched = now;
            entry.last_use = uses;
            entry.value.clone()
        })
    }

    /// Stores a value, making room first when a new id would exceed `capacity`.
    fn write(&mut self, id: &SessionId, value: String, ttl: Duration, capacity: usize) {
        let now = Instant::now();
        if !self.entries.contains_key(id) && self.entries.len() >= capacity {
            let before = self.entries.len();
            self.entries.retain(|_, entry| now.duration_since(entry.touched) < ttl);
            debug!(dropped = before - self.entries.len(), "Swept expired sessions");

            if self.entries.len() >= capacity {
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_use)
                    .map(|(oldest, _)| oldest.clone());
                if let Some(oldest) = oldest {
                    debug!(session_id = %oldest, "Evicting least recently used session");
                    self.entries.remove(&oldest);
                }
            }
        }

        self.uses += 1;
        self.entries.insert(
            id.clone(),
            StoredSession {
                value,
                touched: now,
                last_use: self.uses,
            },
        );
    }
}

/// Process-local session store.
///
/// Entries untouched for longer than the time-to-live read as absent, and
/// the store never holds more than its capacity.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    table: Arc<Mutex<SessionTable>>,
    ttl: Duration,
    capacity: usize,
}

impl InMemorySessionStore {
    /// Creates an empty store with the default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }

    /// Creates an empty store with the given time-to-live and capacity.
    ///
    /// A capacity of zero is raised to one.
    #[instrument]
    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        debug!("Creating in-memory session store");
        Self {
            table: Arc::default(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Number of stored sessions, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True when no session is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, SessionTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &SessionId) -> Option<String> {
        self.lock().read(id, self.ttl)
    }

    fn put(&self, id: &SessionId, value: String) {
        self.lock().write(id, value, self.ttl, self.capacity);
    }

    // Holds the lock for the whole closure so requests from one visitor serialize.
    fn update(&self, id: &SessionId, f: &mut dyn FnMut(Option<String>) -> Option<String>) {
        let mut table = self.lock();
        let current = table.read(id, self.ttl);
        if let Some(next) = f(current) {
            table.write(id, next, self.ttl, self.capacity);
        }
    }
}

/// Stored form of a visitor's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    state: Snapshot,
    #[serde(default)]
    flashes: Vec<String>,
}

/// Everything the web front end keeps for one visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorSession {
    /// Current game.
    pub state: GameState,
    /// Messages waiting to be shown on the next page view.
    pub flashes: Vec<String>,
}

impl VisitorSession {
    /// Starts a fresh game with no pending messages.
    pub fn fresh(starting: Mark) -> Self {
        Self {
            state: GameState::new(starting),
            flashes: Vec::new(),
        }
    }

    /// Decodes a stored value, falling back to a fresh session when the value
    /// is missing or malformed.
    #[instrument(skip(stored))]
    pub fn decode(stored: Option<&str>, starting: Mark) -> Self {
        let Some(stored) = stored else {
            debug!("No stored session, starting fresh");
            return Self::fresh(starting);
        };

        let record: SessionRecord = match serde_json::from_str(stored) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Stored session is not valid JSON, starting fresh");
                return Self::fresh(starting);
            }
        };

        match GameState::from_snapshot(&record.state) {
            Ok(state) if state.board().size() == BOARD_SIZE => Self {
                state,
                flashes: record.flashes,
            },
            Ok(state) => {
                warn!(
                    size = state.board().size(),
                    "Stored board has the wrong size, starting fresh"
                );
                Self::fresh(starting)
            }
            Err(e) => {
                warn!(error = %e, "Stored game state is malformed, starting fresh");
                Self::fresh(starting)
            }
        }
    }

    /// Encodes this session for storage.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SessionRecord {
            state: self.state.to_snapshot(),
            flashes: self.flashes.clone(),
        })
    }

    /// Queues a message for the next page view.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flashes.push(message.into());
    }
}
