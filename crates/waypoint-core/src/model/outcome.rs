use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three lifecycle states of an outcome.
///
/// The graph algorithms never interpret status — it rides along for
/// rendering and for callers that filter by progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    InProgress,
    Achieved,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Achieved => "achieved",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized status strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid status '{}' (expected not_started, in_progress, or achieved)",
            self.0
        )
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for Status {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "achieved" => Ok(Self::Achieved),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// All persisted fields for an outcome.
///
/// `dependencies` holds the ids of outcomes this one depends on, in the
/// order they were added. Invariants (no self-reference, no duplicates,
/// every id resolvable) are enforced by the dependency engine on mutation
/// and checked wholesale by [`crate::model::Collection::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub dependencies: Vec<String>,
    pub created_at_us: i64,
    pub updated_at_us: i64,
}

impl Default for Outcome {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            status: Status::default(),
            dependencies: Vec::new(),
            created_at_us: 0,
            updated_at_us: 0,
        }
    }
}

impl Outcome {
    /// Create a new outcome with both timestamps set to now.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = now_us();
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::NotStarted,
            dependencies: Vec::new(),
            created_at_us: now,
            updated_at_us: now,
        }
    }

    /// Title if non-empty, otherwise the id. Used when naming nodes in
    /// cycle errors.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Refresh `updated_at_us` to the current wall clock.
    pub fn touch(&mut self) {
        self.updated_at_us = now_us();
    }
}

/// Current wall-clock time in microseconds since the Unix epoch.
#[must_use]
pub fn now_us() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
