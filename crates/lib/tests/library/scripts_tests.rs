//! Whole scripts, success and failure.

use envgraph_lib::eval::{EvalError, evaluate_source};
use envgraph_lib::graph::{GraphError, LanguageLabel, LanguageName};
use envgraph_lib::rules::RuleError;

fn rule_error(script: &str) -> RuleError {
  let err = evaluate_source("build.envd.lua", script).unwrap_err();
  err.rule_error().cloned().unwrap_or_else(|| panic!("expected a rule error, got {err}"))
}

mod python {
  use super::*;

  #[test]
  fn python_two_is_rejected() {
    assert_eq!(
      rule_error(r#"install.python("2.7")"#).graph_error(),
      Some(&GraphError::UnsupportedVersion {
        version: "2.7".to_string()
      })
    );
  }

  #[test]
  fn python_three_is_appended() -> Result<(), EvalError> {
    let graph = evaluate_source("build.envd.lua", r#"install.python("3.11")"#)?;
    assert_eq!(graph.languages.len(), 1);
    assert_eq!(graph.languages[0].name, LanguageName::Python);
    assert_eq!(graph.languages[0].version.as_deref(), Some("3.11"));
    Ok(())
  }
}

mod dependency_lists {
  use super::*;

  #[test]
  fn empty_r_packages_fail() {
    assert_eq!(
      rule_error(r#"install.r_packages{ name = {} }"#).graph_error(),
      Some(&GraphError::EmptyDependencyList {
        language: LanguageLabel::R
      })
    );
  }

  #[test]
  fn empty_julia_packages_fail() {
    assert_eq!(
      rule_error(r#"install.julia_packages({})"#).graph_error(),
      Some(&GraphError::EmptyDependencyList {
        language: LanguageLabel::Julia
      })
    );
  }

  #[test]
  fn single_r_package_is_one_batch() -> Result<(), EvalError> {
    let graph = evaluate_source("build.envd.lua", r#"install.r_packages{ name = { "ggplot2" } }"#)?;
    assert_eq!(graph.r_packages, vec![vec!["ggplot2".to_string()]]);
    Ok(())
  }

  #[test]
  fn empty_apt_and_vscode_lists_are_accepted() -> Result<(), EvalError> {
    let graph = evaluate_source(
      "build.envd.lua",
      r#"
        install.apt_packages{ name = {} }
        install.vscode_extensions{ name = {} }
      "#,
    )?;
    assert!(graph.system_packages.is_empty());
    assert!(graph.vscode_plugins.is_empty());
    Ok(())
  }
}

mod arguments {
  use super::*;

  #[test]
  fn unknown_keyword() {
    let err = rule_error(r#"install.python{ verison = "3.12" }"#);
    assert!(matches!(err, RuleError::ArgumentShape { rule: "install.python", .. }));
    assert!(err.to_string().contains("verison"));
  }

  #[test]
  fn wrong_type() {
    let err = rule_error(r#"install.apt_packages{ name = "curl" }"#);
    assert!(matches!(
      err,
      RuleError::TypeMismatch {
        rule: "install.apt_packages",
        param: "name",
        ..
      }
    ));
  }

  #[test]
  fn map_passed_alone_points_at_map_parameter() {
    let err = rule_error(r#"runtime.command({ serve = "python -m http.server" })"#);
    assert!(matches!(err, RuleError::ArgumentShape { rule: "runtime.command", .. }));
    let message = err.to_string();
    assert!(message.contains("serve"), "{message}");
    assert!(message.contains("commands = {"), "{message}");
  }

  #[test]
  fn function_argument_is_a_type_mismatch() {
    let err = rule_error(r#"install.apt_packages(print)"#);
    assert!(matches!(
      err,
      RuleError::TypeMismatch {
        rule: "install.apt_packages",
        param: "name",
        ..
      }
    ));
  }

  #[test]
  fn too_many_positionals() {
    let err = rule_error(r#"install.r_lang("4.3")"#);
    assert!(matches!(err, RuleError::ArgumentShape { rule: "install.r_lang", .. }));
  }

  #[test]
  fn unknown_rule_is_a_lua_error() {
    let err = evaluate_source("build.envd.lua", r#"install.ruby()"#).unwrap_err();
    assert!(matches!(err, EvalError::Lua(_)));
    assert!(err.rule_error().is_none());
  }
}

mod validation {
  use super::*;

  #[test]
  fn bad_checksum() {
    let err = rule_error(r#"io.http{ url = "https://example.com/x", checksum = "sha256:abc" }"#);
    assert!(matches!(err.graph_error(), Some(GraphError::InvalidDigest(_))));
  }

  #[test]
  fn bad_extension_appends_nothing() {
    let err = rule_error(r#"install.vscode_extensions{ name = { "ms-python.python", "broken" } }"#);
    assert!(matches!(err.graph_error(), Some(GraphError::InvalidPluginSpecifier(_))));
  }

  #[test]
  fn pcall_recovers_and_graph_is_unchanged() -> Result<(), EvalError> {
    let graph = evaluate_source(
      "build.envd.lua",
      r#"
        local ok = pcall(install.python, "2.7")
        assert(not ok)
        install.python("3.12")
      "#,
    )?;
    assert_eq!(graph.languages.len(), 1);
    assert_eq!(graph.languages[0].version.as_deref(), Some("3.12"));
    Ok(())
  }
}
