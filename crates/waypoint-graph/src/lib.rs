#![forbid(unsafe_code)]
//! waypoint-graph library.
//!
//! Two engines over conceptually similar but policy-different graphs:
//!
//! - [`depgraph`] — the *enforced-acyclic* dependency engine. Fail-fast:
//!   self-dependencies, missing endpoints, and cycle-introducing edges
//!   raise typed errors and persist nothing.
//! - [`layout`] — the *tolerant* layered layout engine. Never fails:
//!   invalid edges are filtered, cycles are broken for layering but kept
//!   in the output, unplaceable nodes get a fallback position.
//!
//! # Conventions
//!
//! - **Errors**: [`waypoint_core::Error`] with stable `E####` codes.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`,
//!   `trace!`).

pub mod depgraph;
pub mod intern;
pub mod layout;

pub use depgraph::{DependencyEngine, RenderEdge, RenderGraph, RenderNode, topological_sort};
pub use layout::{FlowEdge, FlowLayout, FlowNode, PlacedNode, compute_layout, compute_layout_with};
