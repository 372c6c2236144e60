//! Lua runtime for build scripts.
//!
//! Each evaluation gets its own [`Lua`](mlua::Lua) and its own [`GraphHandle`].
//! Rule functions registered on the runtime capture the handle, so scripts
//! running side by side never share a graph.
//!
//! # Submodules
//!
//! - [`runtime`] - VM creation and script execution
//! - [`values`] - Conversion of Lua call arguments into rule [`Args`](crate::rules::Args)

use std::cell::RefCell;
use std::rc::Rc;

use crate::graph::Graph;

pub mod runtime;
pub mod values;

/// The graph under construction, shared between the evaluator and the rule
/// functions of one runtime.
pub type GraphHandle = Rc<RefCell<Graph>>;
