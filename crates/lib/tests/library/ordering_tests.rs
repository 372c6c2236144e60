//! Ordered graph fields follow call order.

use envgraph_lib::eval::evaluate_source;
use envgraph_lib::util::hash::Hashable;
use mlua::prelude::*;

use super::common::create_test_runtime;

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn python_packages_keep_one_batch_per_call() -> LuaResult<()> {
  let (lua, graph) = create_test_runtime()?;
  lua
    .load(
      r#"
        install.python_packages{ name = { "numpy" } }
        install.python_packages{ name = { "pandas", "numpy" } }
      "#,
    )
    .exec()?;
  assert_eq!(
    graph.borrow().pypi_packages,
    vec![strings(&["numpy"]), strings(&["pandas", "numpy"])]
  );
  Ok(())
}

#[test]
fn batches_and_steps_interleave_in_call_order() -> LuaResult<()> {
  let (lua, graph) = create_test_runtime()?;
  lua
    .load(
      r#"
        install.r_lang()
        install.r_packages{ name = { "ggplot2" } }
        run{ commands = { "make deps" } }
        install.r_packages({ "dplyr", "tidyr" })
        run({ "make" }, true)
        install.apt_packages{ name = { "curl" } }
        install.apt_packages{ name = { "git", "curl" } }
        io.copy("a", "/a")
        io.copy("b", "/b")
      "#,
    )
    .exec()?;

  let graph = graph.borrow();
  assert_eq!(
    graph.r_packages,
    vec![strings(&["ggplot2"]), strings(&["dplyr", "tidyr"])]
  );
  let steps: Vec<_> = graph.exec.iter().map(|s| (s.commands.clone(), s.mount_host)).collect();
  assert_eq!(
    steps,
    vec![(strings(&["make deps"]), false), (strings(&["make"]), true)]
  );
  assert_eq!(graph.system_packages, strings(&["curl", "git", "curl"]));
  let copies: Vec<_> = graph.copy.iter().map(|c| c.destination.as_str()).collect();
  assert_eq!(copies, vec!["/a", "/b"]);
  Ok(())
}

#[test]
fn languages_append_in_call_order() -> LuaResult<()> {
  let (lua, graph) = create_test_runtime()?;
  lua
    .load(r#"install.julia() install.python("3.10") install.python()"#)
    .exec()?;
  let names: Vec<_> = graph
    .borrow()
    .languages
    .iter()
    .map(|l| (l.name.as_str(), l.version.clone()))
    .collect();
  assert_eq!(
    names,
    vec![
      ("julia", None),
      ("python", Some("3.10".to_string())),
      ("python", Some("3.11".to_string())),
    ]
  );
  Ok(())
}

#[test]
fn same_script_same_graph() {
  let script = r#"
    base{ image = "ubuntu:22.04", dev = true }
    install.python()
    install.python_packages{ name = { "numpy" }, local_wheels = { "dist/app.whl" } }
    install.vscode_extensions{ name = { "ms-python.python-2023.1.0" } }
    config.jupyter{ token = "" }
    config.pip_index{ url = "https://pypi.example.com/simple" }
    io.http{ url = "https://example.com/data.tar.gz", checksum = "sha256:" .. string.rep("ab", 32) }
    runtime.environ{ env = { B = "2", A = "1" }, extra_path = { "/opt/bin" } }
  "#;

  let first = evaluate_source("build.envd.lua", script).unwrap();
  let second = evaluate_source("build.envd.lua", script).unwrap();
  assert_eq!(first, second);
  assert_eq!(first.compute_hash().unwrap(), second.compute_hash().unwrap());
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}
