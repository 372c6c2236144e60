//! Build script evaluation.
//!
//! This module provides [`evaluate_file`] and [`evaluate_source`], which run a
//! build script against a fresh [`Graph`] and return the graph the script
//! built. Evaluation is fail-fast: the first rule error aborts the script and
//! the partially built graph is dropped.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mlua::prelude::*;
use tracing::info;

use crate::graph::Graph;
use crate::lua::runtime;
use crate::rules::RuleError;
use crate::rules::lua::find_rule_error;
use crate::util::hash::Hashable;

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// The script failed, either in Lua itself or in a rule call.
  #[error("lua error: {0}")]
  Lua(#[from] LuaError),

  #[error("cannot read '{}': {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl EvalError {
  /// The rule failure that aborted the script, if that is what happened.
  pub fn rule_error(&self) -> Option<&RuleError> {
    match self {
      EvalError::Lua(err) => find_rule_error(err),
      EvalError::Io { .. } => None,
    }
  }
}

/// Evaluate the build script at `path`.
///
/// Modules under `<script dir>/lua/` can be loaded with `require`.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use envgraph_lib::eval::evaluate_file;
///
/// let graph = evaluate_file(Path::new("build.envd.lua"))?;
/// println!("Languages: {}", graph.languages.len());
/// ```
pub fn evaluate_file(path: &Path) -> Result<Graph, EvalError> {
  let source = std::fs::read_to_string(path).map_err(|source| EvalError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let dir = path.parent().unwrap_or(Path::new("."));
  evaluate(&path.display().to_string(), &source, Some(dir))
}

/// Evaluate a build script held in memory. `name` labels it in error messages.
pub fn evaluate_source(name: &str, source: &str) -> Result<Graph, EvalError> {
  evaluate(name, source, None)
}

fn evaluate(name: &str, source: &str, dir: Option<&Path>) -> Result<Graph, EvalError> {
  info!(script = name, "evaluating build script");
  let graph = Rc::new(RefCell::new(Graph::new()));

  // The runtime holds clones of the handle; drop it before taking the graph back.
  {
    let lua = runtime::create_runtime(graph.clone())?;
    if let Some(dir) = dir {
      runtime::prepend_package_path(&lua, dir)?;
    }
    runtime::exec_source(&lua, name, source)?;
  }

  let graph = Rc::try_unwrap(graph).unwrap_or_else(|shared| RefCell::new(shared.borrow().clone()));
  let graph = graph.into_inner();
  info!(
    script = name,
    hash = %graph.compute_hash().map(|h| h.0).unwrap_or_default(),
    languages = graph.languages.len(),
    steps = graph.exec.len(),
    "evaluation complete"
  );
  Ok(graph)
}
