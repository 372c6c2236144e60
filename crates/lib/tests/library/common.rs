use std::cell::RefCell;
use std::rc::Rc;

use envgraph_lib::graph::Graph;
use envgraph_lib::lua::GraphHandle;
use envgraph_lib::lua::runtime::create_runtime;
use mlua::prelude::*;

/// A runtime with every rule registered, plus the graph it writes to.
pub fn create_test_runtime() -> LuaResult<(Lua, GraphHandle)> {
  let graph = Rc::new(RefCell::new(Graph::new()));
  let lua = create_runtime(graph.clone())?;
  Ok((lua, graph))
}
