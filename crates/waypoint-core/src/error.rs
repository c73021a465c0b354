//! Error codes and the typed error enum shared by the waypoint engines.
//!
//! # Overview
//!
//! Two layers:
//!
//! - [`ErrorCode`]: stable, machine-readable `E####` identifiers with a
//!   short message and an optional remediation hint. Agents and scripts
//!   branch on these.
//! - [`Error`]: the typed error enum returned by the dependency engine
//!   and the stores. Every variant maps to exactly one [`ErrorCode`].
//!
//! The layered layout engine is deliberately infallible and never
//! produces these — see the crate docs for the strictness split.

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    OutcomeNotFound,
    SelfDependency,
    CycleDetected,
    MalformedCollection,
    VersionConflict,
    StoreIoFailed,
    StoreDecodeFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::OutcomeNotFound => "E2001",
            Self::SelfDependency => "E2002",
            Self::CycleDetected => "E2003",
            Self::MalformedCollection => "E3001",
            Self::VersionConflict => "E5001",
            Self::StoreIoFailed => "E5002",
            Self::StoreDecodeFailed => "E5003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutcomeNotFound => "Outcome not found",
            Self::SelfDependency => "Outcome cannot depend on itself",
            Self::CycleDetected => "Dependency cycle would be created",
            Self::MalformedCollection => "Outcome collection is malformed",
            Self::VersionConflict => "Collection version conflict",
            Self::StoreIoFailed => "Outcome store read/write failed",
            Self::StoreDecodeFailed => "Outcome store decode failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::OutcomeNotFound => None,
            Self::SelfDependency => Some("Pick a different dependency target."),
            Self::CycleDetected => {
                Some("Remove/adjust dependency links to keep the graph acyclic.")
            }
            Self::MalformedCollection => {
                Some("Repair unknown or duplicate dependency ids before retrying.")
            }
            Self::VersionConflict => Some("Reload the collection and retry the mutation."),
            Self::StoreIoFailed => Some("Check disk space and write permissions."),
            Self::StoreDecodeFailed => Some("Verify the store file was not edited by hand."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Typed errors for the dependency engine and the outcome stores.
#[derive(Debug, Error)]
pub enum Error {
    /// Referenced outcome id does not exist in the collection.
    #[error("outcome '{id}' not found")]
    OutcomeNotFound { id: String },

    /// An outcome may not depend on itself.
    #[error("outcome '{id}' cannot depend on itself")]
    SelfDependency { id: String },

    /// Committing the edge would close a dependency cycle.
    ///
    /// `from_title`/`to_title` are the human-readable titles of the edge
    /// endpoints; `detail` lists the titles of every node left unordered
    /// by the topological sort.
    #[error("adding dependency '{from_title}' → '{to_title}' would create a cycle: {detail}")]
    CycleDetected {
        from_title: String,
        to_title: String,
        detail: String,
    },

    /// A full-collection sort found unresolved cycles.
    #[error("dependency graph contains a cycle through: {detail}")]
    UnresolvedCycle { detail: String },

    /// The collection failed well-formedness validation.
    #[error("malformed outcome collection: {detail}")]
    MalformedCollection { detail: String },

    /// Optimistic-concurrency check failed on save.
    #[error("version conflict: tried to save version {attempted}, store has {current}")]
    VersionConflict { attempted: u64, current: u64 },

    /// Underlying store I/O failure.
    #[error("store I/O failed")]
    Io(#[from] std::io::Error),

    /// Underlying store (de)serialization failure.
    #[error("store decode failed")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map this error to its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::OutcomeNotFound { .. } => ErrorCode::OutcomeNotFound,
            Self::SelfDependency { .. } => ErrorCode::SelfDependency,
            Self::CycleDetected { .. } | Self::UnresolvedCycle { .. } => ErrorCode::CycleDetected,
            Self::MalformedCollection { .. } => ErrorCode::MalformedCollection,
            Self::VersionConflict { .. } => ErrorCode::VersionConflict,
            Self::Io(_) => ErrorCode::StoreIoFailed,
            Self::Json(_) => ErrorCode::StoreDecodeFailed,
        }
    }
}

/// Convenience alias used across both engine crates.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
