use std::collections::BTreeMap;
use std::fmt;

/// An untyped argument as it arrives from the script.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  None,
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  List(Vec<Value>),
  Map(BTreeMap<String, Value>),
  /// A script value with no rule-level meaning (a function, userdata, a table
  /// mixing list and map keys). Binding rejects it as a type mismatch.
  Unsupported(&'static str),
}

impl Value {
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::None => "nil",
      Value::Bool(_) => "boolean",
      Value::Int(_) => "integer",
      Value::Float(_) => "number",
      Value::Str(_) => "string",
      Value::List(_) => "list",
      Value::Map(_) => "map",
      Value::Unsupported(kind) => kind,
    }
  }

  pub fn is_none(&self) -> bool {
    matches!(self, Value::None)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::None => f.write_str("nil"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::Float(n) => write!(f, "{}", n),
      Value::Str(s) => write!(f, "{:?}", s),
      Value::List(items) => {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}", item)?;
        }
        f.write_str("]")
      }
      Value::Map(map) => {
        f.write_str("{")?;
        for (i, (k, v)) in map.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{} = {}", k, v)?;
        }
        f.write_str("}")
      }
      Value::Unsupported(kind) => write!(f, "<{}>", kind),
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Str(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Str(s)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Int(i)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(items: Vec<T>) -> Self {
    Value::List(items.into_iter().map(Into::into).collect())
  }
}

/// Arguments of one rule call: positional values first, then keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
  pub positional: Vec<Value>,
  pub keyword: Vec<(String, Value)>,
}

impl Args {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn arg(mut self, value: impl Into<Value>) -> Self {
    self.positional.push(value.into());
    self
  }

  pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Self {
    self.keyword.push((name.to_string(), value.into()));
    self
  }
}
