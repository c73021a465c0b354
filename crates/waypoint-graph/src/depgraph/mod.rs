//! The enforced-acyclic dependency engine.
//!
//! # Overview
//!
//! Maintains the dependency graph stored inside the outcome collection.
//! Every mutation must leave the graph a DAG or be rejected — downstream
//! consumers order execution off [`topo::topological_sort`] and a cycle
//! would wedge them.
//!
//! ## Pipeline
//!
//! ```text
//! OutcomeStore::load()
//!        ↓  engine::DependencyEngine  (CRUD + speculative-edge check)
//! Collection (guaranteed DAG)
//!        ↓  topo::topological_sort    (Kahn, collection-order ties)
//! dependency-first ordering
//!        ↓  serialize::render         (longest-path layers + spacing)
//! RenderGraph { nodes: [{id,title,status,x,y}], edges: [{from,to}] }
//! ```

pub mod engine;
pub mod serialize;
pub mod topo;

pub use engine::DependencyEngine;
pub use serialize::{RenderEdge, RenderGraph, RenderNode};
pub use topo::topological_sort;
