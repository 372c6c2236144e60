//! Lua bindings for the rule catalogue.
//!
//! Global rules (`base`, `shell`, `run`) become global functions. Every other
//! rule is placed on its namespace table (`install`, `config`, `runtime`,
//! `io`). An existing global table of that name is extended rather than
//! replaced, so the standard `io` library stays usable.

use std::collections::BTreeMap;

use mlua::prelude::*;
use tracing::debug;

use super::{RuleError, RuleKind, dispatch};
use crate::lua::GraphHandle;
use crate::lua::values::lua_args;

/// Register one Lua function per rule, each capturing `graph`.
pub fn register_rules(lua: &Lua, graph: GraphHandle) -> LuaResult<()> {
  let globals = lua.globals();
  let mut tables: BTreeMap<&'static str, LuaTable> = BTreeMap::new();

  for kind in RuleKind::all() {
    let func = create_rule_function(lua, kind, graph.clone())?;
    match kind.namespace().table() {
      None => globals.set(kind.name(), func)?,
      Some(ns) => {
        let table = match tables.get(ns) {
          Some(table) => table.clone(),
          None => {
            let table = match globals.get::<LuaValue>(ns)? {
              LuaValue::Table(existing) => existing,
              _ => lua.create_table()?,
            };
            tables.insert(ns, table.clone());
            table
          }
        };
        table.set(kind.name(), func)?;
      }
    }
  }

  for (ns, table) in tables {
    globals.set(ns, table)?;
  }
  debug!(count = RuleKind::all().count(), "registered rules");
  Ok(())
}

fn create_rule_function(lua: &Lua, kind: RuleKind, graph: GraphHandle) -> LuaResult<LuaFunction> {
  lua.create_function(move |_, args: LuaMultiValue| {
    let args = lua_args(args).map_err(|e| {
      LuaError::external(RuleError::ArgumentShape {
        rule: kind.qualified_name(),
        message: e.to_string(),
      })
    })?;
    let mut graph = graph.try_borrow_mut().map_err(LuaError::external)?;
    dispatch(&mut graph, kind, args).map_err(LuaError::external)
  })
}

/// Find the [`RuleError`] that aborted a script.
///
/// A rule failure reaches the caller wrapped in one or more
/// `CallbackError`/`WithContext` layers, one per Lua frame it crossed.
pub fn find_rule_error(err: &LuaError) -> Option<&RuleError> {
  match err {
    LuaError::CallbackError { cause, .. } | LuaError::WithContext { cause, .. } => find_rule_error(cause),
    LuaError::ExternalError(inner) => inner
      .downcast_ref::<RuleError>()
      .or_else(|| inner.downcast_ref::<LuaError>().and_then(find_rule_error)),
    _ => None,
  }
}
