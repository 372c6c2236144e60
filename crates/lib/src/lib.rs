//! envgraph-lib: build scripts in, environment build graphs out.
//!
//! This crate provides the pieces behind `envgraph eval`:
//! - `Graph`: the intermediate representation of one development environment
//! - `rules`: the catalogue of script-callable rules and their argument binding
//! - `lua`: the Lua runtime that exposes the rules to build scripts
//! - `eval`: evaluating a script into a `Graph`

pub mod consts;
pub mod digest;
pub mod eval;
pub mod graph;
pub mod lua;
pub mod rules;
pub mod util;
pub mod vscode;
