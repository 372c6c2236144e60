//! Tests for the conda manager lifecycle.

use envgraph_lib::eval::evaluate_source;
use envgraph_lib::graph::{GraphError, ManagerState, PackageManager};
use mlua::prelude::*;

use super::common::create_test_runtime;

mod prerequisite {
  use super::*;

  #[test]
  fn packages_before_conda_fail() {
    let err = evaluate_source("build.envd.lua", r#"install.conda_packages{ name = { "numpy" } }"#).unwrap_err();
    let rule_error = err.rule_error().expect("rule error");
    assert_eq!(
      rule_error.graph_error(),
      Some(&GraphError::MissingPrerequisite {
        manager: PackageManager::Conda,
        action: "install conda packages",
      })
    );
  }

  #[test]
  fn packages_after_conda_succeed() -> LuaResult<()> {
    let (lua, graph) = create_test_runtime()?;
    lua.load("install.conda()").exec()?;
    assert_eq!(graph.borrow().manager_state(PackageManager::Conda), ManagerState::Enabled);

    lua.load(r#"install.conda_packages{ name = { "numpy" } }"#).exec()?;
    let graph = graph.borrow();
    assert_eq!(graph.manager_state(PackageManager::Conda), ManagerState::EnabledWithPackages);
    assert!(graph.conda_config.as_ref().is_some_and(|c| c.packages.contains(&"numpy".to_string())));
    Ok(())
  }

  #[test]
  fn channel_needs_conda() {
    let err = evaluate_source("build.envd.lua", r#"config.conda_channel("channels: [conda-forge]")"#).unwrap_err();
    assert!(matches!(
      err.rule_error().and_then(|e| e.graph_error()),
      Some(GraphError::MissingPrerequisite { .. })
    ));
  }
}

mod env_file {
  use super::*;

  #[test]
  fn exclusive_with_names_in_either_order() {
    for script in [
      r#"install.conda() install.conda_packages{ env_file = "env.yml", name = { "numpy" } }"#,
      r#"install.conda() install.conda_packages{ name = { "numpy" }, env_file = "env.yml" }"#,
      r#"install.conda() install.conda_packages({ "numpy" }, nil, "env.yml")"#,
    ] {
      let err = evaluate_source("build.envd.lua", script).unwrap_err();
      assert!(
        matches!(
          err.rule_error().and_then(|e| e.graph_error()),
          Some(GraphError::MutuallyExclusiveArguments { .. })
        ),
        "{script}: {err}"
      );
    }
  }

  #[test]
  fn env_file_alone_is_recorded() -> LuaResult<()> {
    let (lua, graph) = create_test_runtime()?;
    lua
      .load(r#"install.conda{ use_mamba = true } install.conda_packages{ env_file = "env.yml" }"#)
      .exec()?;
    let graph = graph.borrow();
    let conda = graph.conda_config.as_ref().expect("conda enabled");
    assert!(conda.use_mamba);
    assert_eq!(conda.env_file.as_deref(), Some("env.yml"));
    assert!(conda.packages.is_empty());
    Ok(())
  }

  #[test]
  fn later_call_without_env_file_clears_it() -> LuaResult<()> {
    let (lua, graph) = create_test_runtime()?;
    lua
      .load(
        r#"
          install.conda()
          install.conda_packages{ env_file = "env.yml" }
          install.conda_packages{ name = { "numpy" } }
        "#,
      )
      .exec()?;
    let graph = graph.borrow();
    let conda = graph.conda_config.as_ref().expect("conda enabled");
    assert_eq!(conda.env_file, None);
    assert_eq!(conda.packages, vec!["numpy".to_string()]);
    Ok(())
  }
}
