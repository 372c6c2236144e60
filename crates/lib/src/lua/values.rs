//! Lua → [`Value`] conversion for rule calls.
//!
//! Two call styles are accepted:
//!
//! ```lua
//! install.python("3.12")                          -- positional
//! install.conda_packages{ name = { "numpy" } }    -- keyword table
//! install.pixi{ true, pypi_index = "https://..." } -- both
//! ```
//!
//! A call is a keyword call when its only argument is a table with at least
//! one string key. The array part of that table supplies positional values.

use std::collections::BTreeMap;

use mlua::prelude::*;

use crate::rules::{Args, Value};

/// Convert the arguments of one Lua call into rule [`Args`].
pub fn lua_args(args: LuaMultiValue) -> LuaResult<Args> {
  let mut values: Vec<LuaValue> = args.into_iter().collect();

  if let [LuaValue::Table(table)] = values.as_slice()
    && has_string_key(table)?
  {
    return keyword_args(table);
  }

  // Trailing nils carry no information; `f(a, nil)` is `f(a)`.
  while matches!(values.last(), Some(LuaValue::Nil)) {
    values.pop();
  }
  let positional = values.into_iter().map(lua_to_value).collect::<LuaResult<Vec<_>>>()?;
  Ok(Args {
    positional,
    keyword: Vec::new(),
  })
}

fn has_string_key(table: &LuaTable) -> LuaResult<bool> {
  for pair in table.pairs::<LuaValue, LuaValue>() {
    let (key, _) = pair?;
    if matches!(key, LuaValue::String(_)) {
      return Ok(true);
    }
  }
  Ok(false)
}

fn keyword_args(table: &LuaTable) -> LuaResult<Args> {
  let len = table.raw_len();
  let mut positional = Vec::with_capacity(len);
  for i in 1..=len {
    positional.push(lua_to_value(table.raw_get(i)?)?);
  }

  // Sorted so that binding errors are reported in a stable order.
  let mut keyword = BTreeMap::new();
  for pair in table.pairs::<LuaValue, LuaValue>() {
    match pair? {
      (LuaValue::String(key), value) => {
        keyword.insert(key.to_str()?.to_string(), lua_to_value(value)?);
      }
      (LuaValue::Integer(i), _) if i >= 1 && (i as usize) <= len => {}
      (key, _) => {
        return Err(LuaError::external(format!(
          "unexpected {} key in argument table",
          key.type_name()
        )));
      }
    }
  }

  Ok(Args {
    positional,
    keyword: keyword.into_iter().collect(),
  })
}

/// Convert a single Lua value.
///
/// Sequence tables become lists, string-keyed tables become maps, and an
/// empty table becomes an empty list. Functions, userdata and tables with
/// mixed keys become [`Value::Unsupported`] so that binding can name the rule
/// and parameter they were passed to.
pub fn lua_to_value(value: LuaValue) -> LuaResult<Value> {
  match value {
    LuaValue::Nil => Ok(Value::None),
    LuaValue::Boolean(b) => Ok(Value::Bool(b)),
    LuaValue::Integer(i) => Ok(Value::Int(i)),
    LuaValue::Number(n) => Ok(Value::Float(n)),
    LuaValue::String(s) => Ok(Value::Str(s.to_str()?.to_string())),
    LuaValue::Table(t) => table_to_value(&t),
    other => Ok(Value::Unsupported(other.type_name())),
  }
}

fn table_to_value(t: &LuaTable) -> LuaResult<Value> {
  let len = t.raw_len();
  let mut map = BTreeMap::new();
  let mut entries = 0usize;

  for pair in t.pairs::<LuaValue, LuaValue>() {
    let (key, value) = pair?;
    entries += 1;
    if let LuaValue::String(key) = key {
      map.insert(key.to_str()?.to_string(), lua_to_value(value)?);
    }
  }

  if entries == 0 {
    return Ok(Value::List(Vec::new()));
  }
  if map.len() == entries {
    return Ok(Value::Map(map));
  }
  if map.is_empty() && len == entries {
    let mut list = Vec::with_capacity(len);
    for i in 1..=len {
      list.push(lua_to_value(t.raw_get(i)?)?);
    }
    return Ok(Value::List(list));
  }
  Ok(Value::Unsupported("mixed table"))
}
