//! Implementation of the `envgraph rules` command.

use anyhow::Result;
use serde::Serialize;

use envgraph_lib::rules::{Namespace, ParamSpec, RuleCategory, RuleKind};

use crate::output::{OutputFormat, print_info, print_json};

#[derive(Serialize)]
struct RuleItem {
  name: &'static str,
  namespace: Namespace,
  category: RuleCategory,
  params: &'static [ParamSpec],
}

pub fn cmd_rules(output: OutputFormat) -> Result<()> {
  if output.is_json() {
    let items: Vec<RuleItem> = RuleKind::all()
      .map(|kind| RuleItem {
        name: kind.qualified_name(),
        namespace: kind.namespace(),
        category: kind.category(),
        params: kind.params(),
      })
      .collect();
    return print_json(&items);
  }

  for kind in RuleKind::all() {
    let params: Vec<String> = kind.params().iter().map(ToString::to_string).collect();
    println!("{}({})", kind.qualified_name(), params.join(", "));
  }
  print_info(&format!("{} rule(s)", RuleKind::all().count()));
  Ok(())
}
