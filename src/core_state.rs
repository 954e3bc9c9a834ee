//! Application state owned by a single controller.
//!
//! `CoreState` holds the session, the record store and the configuration.
//! It is shared as `Arc<CoreState>` between whatever shell drives it and
//! the async login path. `RwLock` guards the session and the store; reads
//! (list views, dashboard) take the read side, commands take the write side.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::authorization::{self, AuthorizationError, Capability};
use crate::config::AppConfig;
use crate::fixtures;
use crate::models::User;
use crate::session::{Session, SessionError};
use crate::store::{RecordStore, StoreError, StoreObserver};
use crate::validation::ValidationError;

/// Source of "today" and "now". Swappable so tests can pin the calendar.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day in the local timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" is the calendar day in the host's local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one instant, read in an explicit timezone offset.
///
/// The offset stands in for the host's local zone, so "today" follows the
/// same rule as [`SystemClock`]: the local calendar day of `now`.
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Frozen at `now`, with local time equal to UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.offset).date_naive()
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    /// Signed-in user and active tab.
    session: RwLock<Session>,
    /// All record collections.
    store: RwLock<RecordStore>,
    pub config: AppConfig,
    clock: Box<dyn Clock>,
}

impl CoreState {
    /// Seeded with demo fixtures, wall clock, config from the environment.
    pub fn new() -> Self {
        let clock = SystemClock;
        let store = RecordStore::seeded(fixtures::seed(clock.today()));
        Self::with_parts(AppConfig::from_env(), Box::new(clock), store)
    }

    pub fn with_parts(config: AppConfig, clock: Box<dyn Clock>, store: RecordStore) -> Self {
        Self {
            session: RwLock::new(Session::new()),
            store: RwLock::new(store),
            config,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ── Session ─────────────────────────────────────────────

    pub fn read_session(&self) -> Result<RwLockReadGuard<'_, Session>, CoreError> {
        self.session.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_session(&self) -> Result<RwLockWriteGuard<'_, Session>, CoreError> {
        self.session.write().map_err(|_| CoreError::LockPoisoned)
    }

    /// Owned copy of the signed-in user.
    pub fn current_user(&self) -> Result<User, CoreError> {
        let guard = self.read_session()?;
        Ok(guard.require_user()?.clone())
    }

    /// The signed-in user, provided their role holds `capability`.
    pub fn authorize(&self, capability: Capability) -> Result<User, CoreError> {
        let user = self.current_user()?;
        authorization::require(user.role, capability)?;
        Ok(user)
    }

    pub fn is_locked(&self) -> bool {
        self.session
            .read()
            .map(|guard| !guard.is_authenticated())
            .unwrap_or(true)
    }

    // ── Store ───────────────────────────────────────────────

    pub fn read_store(&self) -> Result<RwLockReadGuard<'_, RecordStore>, CoreError> {
        self.store.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_store(&self) -> Result<RwLockWriteGuard<'_, RecordStore>, CoreError> {
        self.store.write().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn subscribe(&self, observer: Box<dyn StoreObserver>) -> Result<(), CoreError> {
        self.write_store()?.subscribe(observer);
        Ok(())
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
