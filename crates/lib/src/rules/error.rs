use crate::graph::GraphError;

/// A rule call that could not be applied to the graph.
///
/// Every variant names the rule so the script author can find the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
  #[error("unknown rule `{0}`")]
  UnknownRule(String),

  #[error("rule `{rule}`: {message}")]
  ArgumentShape { rule: &'static str, message: String },

  #[error("rule `{rule}`: parameter `{param}` expects {expected}, got {found}")]
  TypeMismatch {
    rule: &'static str,
    param: &'static str,
    expected: &'static str,
    found: String,
  },

  #[error("rule `{rule}`: {source}")]
  Graph {
    rule: &'static str,
    #[source]
    source: GraphError,
  },
}

impl RuleError {
  /// The graph validation failure behind this error, if any.
  pub fn graph_error(&self) -> Option<&GraphError> {
    match self {
      RuleError::Graph { source, .. } => Some(source),
      _ => None,
    }
  }
}
