//! Outcome data model.

pub mod collection;
pub mod outcome;

pub use collection::Collection;
pub use outcome::{InvalidStatus, Outcome, Status, now_us};
