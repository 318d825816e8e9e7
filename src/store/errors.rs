//! Store error types
//!
//! Error codes:
//! - CARROS_DATA_CORRUPTION (FATAL severity)
//! - CARROS_STORE_LOCK_POISONED (FATAL severity)
//! - CARROS_STORE_IDS_EXHAUSTED (ERROR severity)

use std::fmt;

use thiserror::Error;

use crate::codec::DecodeError;
use crate::model::CarroId;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// Internal consistency is lost; operators must be alerted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store failures. A missing id is not an error; see `CarroRepository::get`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Stored bytes no longer decode. Only this store writes entries, so this
    /// means a codec mismatch or memory corruption.
    #[error("entry {id} is corrupted: {source}")]
    Corrupted {
        id: CarroId,
        #[source]
        source: DecodeError,
    },

    /// A thread panicked while holding the lock
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Every identifier has been issued
    #[error("identifier space exhausted")]
    IdsExhausted,
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Corrupted { .. } => "CARROS_DATA_CORRUPTION",
            StoreError::LockPoisoned => "CARROS_STORE_LOCK_POISONED",
            StoreError::IdsExhausted => "CARROS_STORE_IDS_EXHAUSTED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StoreError::Corrupted { .. } | StoreError::LockPoisoned => Severity::Fatal,
            StoreError::IdsExhausted => Severity::Error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
