use std::path::Path;

use mlua::prelude::*;

use super::GraphHandle;
use crate::rules;

/// Create a Lua runtime with every rule registered against `graph`.
pub fn create_runtime(graph: GraphHandle) -> LuaResult<Lua> {
  let lua = Lua::new();
  rules::lua::register_rules(&lua, graph)?;
  Ok(lua)
}

/// Let `require` find modules under `<dir>/lua/`, ahead of the default search path.
pub fn prepend_package_path(lua: &Lua, dir: &Path) -> LuaResult<()> {
  let package = lua.globals().get::<LuaTable>("package")?;
  let current: String = package.get("path")?;
  let lua_dir = dir.join("lua");
  let path = format!(
    "{dir}/?.lua;{dir}/?/init.lua;{current}",
    dir = lua_dir.to_string_lossy()
  );
  package.set("path", path)
}

/// Run `source` as a script chunk. `name` shows up in error tracebacks.
pub fn exec_source(lua: &Lua, name: &str, source: &str) -> LuaResult<()> {
  lua.load(source).set_name(format!("@{name}")).exec()
}
