//! The build graph: the intermediate representation produced by evaluating a
//! build script.
//!
//! A [`Graph`] accumulates everything a script declares about the environment:
//! base image, language runtimes, package managers and their packages, build
//! steps, and runtime configuration. It is created empty for each evaluation,
//! mutated only through its operations (one per rule), and
//! handed read-only to the graph compiler once evaluation succeeds.
//!
//! # Ordering
//!
//! Every `Vec` field preserves call order. The compiler derives build-step and
//! layer order from it, so two scripts that differ only in call order produce
//! different graphs.
//!
//! # Validation
//!
//! Each operation validates its own input before touching any field and fails
//! with a [`GraphError`]. A failed operation leaves the graph unchanged.

mod error;
mod ops;
mod types;

pub use error::*;
pub use types::*;
