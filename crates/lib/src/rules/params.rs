//! Parameter schemas and argument binding.
//!
//! Each rule declares its parameters once as a `&'static [ParamSpec]`. [`bind`]
//! matches a call's [`Args`] against that schema and converts every value to
//! its declared kind, so rule handlers only ever see typed values.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::RuleError;
use super::value::{Args, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
  Str,
  StrList,
  Bool,
  Int,
  StrMap,
  StrListList,
}

impl ParamKind {
  pub fn describe(self) -> &'static str {
    match self {
      ParamKind::Str => "a string",
      ParamKind::StrList => "a list of strings",
      ParamKind::Bool => "a boolean",
      ParamKind::Int => "an integer",
      ParamKind::StrMap => "a map of strings",
      ParamKind::StrListList => "a list of string lists",
    }
  }
}

/// Whether a parameter must be given, and what it is when it isn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamDefault {
  Required,
  /// Optional with the kind's empty value.
  Unset,
  Str(&'static str),
  Bool(bool),
  Int(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
  pub name: &'static str,
  pub kind: ParamKind,
  pub default: ParamDefault,
}

impl ParamSpec {
  pub const fn required(name: &'static str, kind: ParamKind) -> Self {
    ParamSpec {
      name,
      kind,
      default: ParamDefault::Required,
    }
  }

  pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
    ParamSpec {
      name,
      kind,
      default: ParamDefault::Unset,
    }
  }

  pub const fn with_default(name: &'static str, kind: ParamKind, default: ParamDefault) -> Self {
    ParamSpec { name, kind, default }
  }

  pub fn is_required(&self) -> bool {
    matches!(self.default, ParamDefault::Required)
  }
}

impl fmt::Display for ParamSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.default {
      ParamDefault::Required => write!(f, "{}", self.name),
      ParamDefault::Unset => write!(f, "{}?", self.name),
      ParamDefault::Str(s) => write!(f, "{}={:?}", self.name, s),
      ParamDefault::Bool(b) => write!(f, "{}={}", self.name, b),
      ParamDefault::Int(i) => write!(f, "{}={}", self.name, i),
    }
  }
}

/// A value converted to its parameter's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
  Str(String),
  StrList(Vec<String>),
  Bool(bool),
  Int(i64),
  StrMap(BTreeMap<String, String>),
  StrListList(Vec<Vec<String>>),
}

/// The typed arguments of one call, indexed like the rule's parameter list.
#[derive(Debug)]
pub struct Bound {
  rule: &'static str,
  params: &'static [ParamSpec],
  values: Vec<Option<Arg>>,
}

impl Bound {
  fn get(&self, name: &str) -> Option<&Arg> {
    let index = self.params.iter().position(|p| p.name == name)?;
    self.values[index].as_ref()
  }

  /// String argument, or `""` when unset.
  pub fn str(&self, name: &str) -> &str {
    match self.get(name) {
      Some(Arg::Str(s)) => s,
      _ => "",
    }
  }

  pub fn bool(&self, name: &str) -> bool {
    matches!(self.get(name), Some(Arg::Bool(true)))
  }

  /// List argument, or an empty list when unset.
  pub fn strings(&self, name: &str) -> Vec<String> {
    match self.get(name) {
      Some(Arg::StrList(items)) => items.clone(),
      _ => Vec::new(),
    }
  }

  pub fn string_lists(&self, name: &str) -> Vec<Vec<String>> {
    match self.get(name) {
      Some(Arg::StrListList(items)) => items.clone(),
      _ => Vec::new(),
    }
  }

  pub fn map(&self, name: &str) -> BTreeMap<String, String> {
    match self.get(name) {
      Some(Arg::StrMap(map)) => map.clone(),
      _ => BTreeMap::new(),
    }
  }

  /// Integer argument narrowed to `T`. Unset integers read as zero.
  pub fn int<T: TryFrom<i64>>(&self, name: &'static str) -> Result<T, RuleError> {
    let value = match self.get(name) {
      Some(Arg::Int(i)) => *i,
      _ => 0,
    };
    T::try_from(value).map_err(|_| RuleError::TypeMismatch {
      rule: self.rule,
      param: name,
      expected: "an integer in range",
      found: value.to_string(),
    })
  }
}

/// Match `args` against `params` and convert each value to its declared kind.
///
/// Positional values fill parameters in declaration order; keywords fill by
/// name. A `nil` for an optional parameter leaves it at its default.
pub fn bind(rule: &'static str, params: &'static [ParamSpec], args: Args) -> Result<Bound, RuleError> {
  let shape = |message: String| RuleError::ArgumentShape { rule, message };

  if args.positional.len() > params.len() {
    return Err(shape(format!(
      "accepts at most {} positional argument(s) ({} given)",
      params.len(),
      args.positional.len()
    )));
  }

  let mut raw: Vec<Option<Value>> = vec![None; params.len()];
  for (slot, value) in raw.iter_mut().zip(args.positional) {
    *slot = Some(value);
  }
  for (name, value) in args.keyword {
    let Some(index) = params.iter().position(|p| p.name == name) else {
      let mut message = format!("unexpected keyword argument `{}`", name);
      // A lone map table is read as keywords; point at the map parameter.
      if let Some(map) = params.iter().find(|p| p.kind == ParamKind::StrMap) {
        message.push_str(&format!("; pass a map as `{} = {{ ... }}`", map.name));
      }
      return Err(shape(message));
    };
    if raw[index].is_some() {
      return Err(shape(format!("got multiple values for parameter `{}`", name)));
    }
    raw[index] = Some(value);
  }

  let mut values = Vec::with_capacity(params.len());
  for (spec, value) in params.iter().zip(raw) {
    let value = match value {
      Some(v) if !v.is_none() => Some(convert(rule, spec, v)?),
      _ => match spec.default {
        ParamDefault::Required => return Err(shape(format!("missing required argument `{}`", spec.name))),
        ParamDefault::Unset => None,
        ParamDefault::Str(s) => Some(Arg::Str(s.to_string())),
        ParamDefault::Bool(b) => Some(Arg::Bool(b)),
        ParamDefault::Int(i) => Some(Arg::Int(i)),
      },
    };
    values.push(value);
  }

  Ok(Bound { rule, params, values })
}

fn convert(rule: &'static str, spec: &ParamSpec, value: Value) -> Result<Arg, RuleError> {
  let mismatch = |found: String| RuleError::TypeMismatch {
    rule,
    param: spec.name,
    expected: spec.kind.describe(),
    found,
  };

  match (spec.kind, value) {
    (ParamKind::Str, Value::Str(s)) => Ok(Arg::Str(s)),
    (ParamKind::Bool, Value::Bool(b)) => Ok(Arg::Bool(b)),
    (ParamKind::Int, Value::Int(i)) => Ok(Arg::Int(i)),
    (ParamKind::Int, Value::Float(n)) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(Arg::Int(n as i64)),
    (ParamKind::StrList, Value::List(items)) => string_list(items).map(Arg::StrList).map_err(mismatch),
    (ParamKind::StrListList, Value::List(items)) => items
      .into_iter()
      .map(|item| match item {
        Value::List(inner) => string_list(inner),
        other => Err(format!("{} element {}", other.type_name(), other)),
      })
      .collect::<Result<Vec<_>, _>>()
      .map(Arg::StrListList)
      .map_err(mismatch),
    (ParamKind::StrMap, Value::Map(map)) => map
      .into_iter()
      .map(|(k, v)| match v {
        Value::Str(s) => Ok((k, s)),
        other => Err(format!("{} value for key `{}`", other.type_name(), k)),
      })
      .collect::<Result<BTreeMap<_, _>, _>>()
      .map(Arg::StrMap)
      .map_err(mismatch),
    // An empty table arrives as a list; it is also the empty map.
    (ParamKind::StrMap, Value::List(items)) if items.is_empty() => Ok(Arg::StrMap(BTreeMap::new())),
    (_, other) => Err(mismatch(format!("{} {}", other.type_name(), other))),
  }
}

fn string_list(items: Vec<Value>) -> Result<Vec<String>, String> {
  items
    .into_iter()
    .map(|item| match item {
      Value::Str(s) => Ok(s),
      other => Err(format!("{} element {}", other.type_name(), other)),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const PARAMS: &[ParamSpec] = &[
    ParamSpec::required("name", ParamKind::StrList),
    ParamSpec::optional("channel", ParamKind::Str),
    ParamSpec::with_default("flag", ParamKind::Bool, ParamDefault::Bool(true)),
    ParamSpec::with_default("port", ParamKind::Int, ParamDefault::Int(8888)),
  ];

  #[test]
  fn binds_positional_and_keyword() {
    let args = Args::new().arg(vec!["a", "b"]).kwarg("flag", false);
    let bound = bind("test", PARAMS, args).unwrap();
    assert_eq!(bound.strings("name"), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(bound.str("channel"), "");
    assert!(!bound.bool("flag"));
    assert_eq!(bound.int::<u16>("port").unwrap(), 8888);
  }

  #[test]
  fn defaults_apply_for_nil() {
    let args = Args::new().arg(vec!["a"]).arg(Value::None).arg(Value::None);
    let bound = bind("test", PARAMS, args).unwrap();
    assert!(bound.bool("flag"));
  }

  #[test]
  fn missing_required_is_shape_error() {
    let err = bind("test", PARAMS, Args::new().kwarg("flag", true)).unwrap_err();
    assert_eq!(
      err,
      RuleError::ArgumentShape {
        rule: "test",
        message: "missing required argument `name`".to_string()
      }
    );
  }

  #[test]
  fn required_nil_is_shape_error() {
    let err = bind("test", PARAMS, Args::new().arg(Value::None)).unwrap_err();
    assert!(matches!(err, RuleError::ArgumentShape { .. }));
  }

  #[test]
  fn too_many_positionals() {
    let args = Args::new().arg(vec!["a"]).arg("c").arg(true).arg(1i64).arg("extra");
    let err = bind("test", PARAMS, args).unwrap_err();
    assert!(matches!(err, RuleError::ArgumentShape { ref message, .. } if message.contains("at most 4")));
  }

  #[test]
  fn unknown_keyword() {
    let err = bind("test", PARAMS, Args::new().arg(vec!["a"]).kwarg("nmae", "x")).unwrap_err();
    assert!(matches!(err, RuleError::ArgumentShape { ref message, .. } if message.contains("`nmae`")));
  }

  #[test]
  fn unknown_keyword_hints_at_map_parameter() {
    const MAP_PARAMS: &[ParamSpec] = &[ParamSpec::required("commands", ParamKind::StrMap)];
    let args = Args::new().kwarg("serve", "python -m http.server");
    let err = bind("runtime.command", MAP_PARAMS, args).unwrap_err();
    assert!(matches!(
      err,
      RuleError::ArgumentShape { ref message, .. }
        if message.contains("`serve`") && message.contains("commands = {")
    ));

    let err = bind("test", PARAMS, Args::new().arg(vec!["a"]).kwarg("nmae", "x")).unwrap_err();
    assert!(matches!(err, RuleError::ArgumentShape { ref message, .. } if !message.contains("pass a map")));
  }

  #[test]
  fn duplicate_value() {
    let args = Args::new().arg(vec!["a"]).kwarg("name", vec!["b"]);
    let err = bind("test", PARAMS, args).unwrap_err();
    assert!(matches!(err, RuleError::ArgumentShape { ref message, .. } if message.contains("multiple values")));
  }

  #[test]
  fn wrong_kind_is_type_mismatch() {
    let err = bind("test", PARAMS, Args::new().arg("numpy")).unwrap_err();
    assert_eq!(
      err,
      RuleError::TypeMismatch {
        rule: "test",
        param: "name",
        expected: "a list of strings",
        found: "string \"numpy\"".to_string()
      }
    );
  }

  #[test]
  fn unsupported_value_is_type_mismatch() {
    let args = Args::new().arg(vec!["a"]).kwarg("channel", Value::Unsupported("function"));
    let err = bind("test", PARAMS, args).unwrap_err();
    assert_eq!(
      err,
      RuleError::TypeMismatch {
        rule: "test",
        param: "channel",
        expected: "a string",
        found: "function <function>".to_string()
      }
    );
  }

  #[test]
  fn non_string_list_element_is_type_mismatch() {
    let args = Args::new().arg(Value::List(vec![Value::from("a"), Value::Int(3)]));
    let err = bind("test", PARAMS, args).unwrap_err();
    assert!(matches!(err, RuleError::TypeMismatch { param: "name", .. }));
  }

  #[test]
  fn integral_float_is_accepted() {
    let args = Args::new().arg(vec!["a"]).kwarg("port", Value::Float(8080.0));
    let bound = bind("test", PARAMS, args).unwrap();
    assert_eq!(bound.int::<u16>("port").unwrap(), 8080);

    let args = Args::new().arg(vec!["a"]).kwarg("port", Value::Float(80.5));
    assert!(bind("test", PARAMS, args).is_err());
  }

  #[test]
  fn out_of_range_int_is_type_mismatch() {
    let args = Args::new().arg(vec!["a"]).kwarg("port", 70000i64);
    let bound = bind("test", PARAMS, args).unwrap();
    assert!(matches!(
      bound.int::<u16>("port"),
      Err(RuleError::TypeMismatch { param: "port", .. })
    ));
  }

  #[test]
  fn display_marks_optional_and_defaults() {
    let rendered: Vec<String> = PARAMS.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["name", "channel?", "flag=true", "port=8888"]);
  }
}
