//! Implementation of the `envgraph eval` command.
//!
//! Evaluates a build script and prints either a summary of the resulting
//! graph or the whole graph as JSON.

use std::path::Path;

use anyhow::{Context, Result};

use envgraph_lib::eval::evaluate_file;
use envgraph_lib::graph::{Graph, ManagerState, PackageManager};
use envgraph_lib::util::hash::Hashable;

use crate::output::{OutputFormat, print_json, print_stat, print_success, symbols, truncate_hash};

pub fn cmd_eval(file: &Path, output: OutputFormat) -> Result<()> {
  let graph = evaluate_file(file).with_context(|| format!("Failed to evaluate build script: {}", file.display()))?;

  if output.is_json() {
    return print_json(&graph);
  }

  let hash = graph.compute_hash().context("Failed to compute graph hash")?;
  print_success(&format!("Evaluated {} ({})", file.display(), truncate_hash(&hash.0)));
  print_summary(&graph);
  Ok(())
}

fn print_summary(graph: &Graph) {
  print_stat("Image", graph.image.as_deref().unwrap_or("(default)"));
  print_stat("Shell", &graph.shell);

  let languages: Vec<String> = graph
    .languages
    .iter()
    .map(|l| match &l.version {
      Some(version) => format!("{} {}", l.name.as_str(), version),
      None => l.name.as_str().to_string(),
    })
    .collect();
  if !languages.is_empty() {
    print_stat("Languages", &languages.join(", "));
  }

  let managers: Vec<&str> = [
    (PackageManager::Conda, "conda"),
    (PackageManager::Pixi, "pixi"),
    (PackageManager::Uv, "uv"),
  ]
  .into_iter()
  .filter(|(m, _)| graph.manager_state(*m) != ManagerState::Disabled)
  .map(|(_, name)| name)
  .collect();
  if !managers.is_empty() {
    print_stat("Managers", &managers.join(", "));
  }

  println!();
  print_batches("Python packages", &graph.pypi_packages);
  print_batches("R packages", &graph.r_packages);
  print_batches("Julia packages", &graph.julia_packages);
  if !graph.system_packages.is_empty() {
    print_stat("System packages", &graph.system_packages.len().to_string());
  }
  if let Some(conda) = &graph.conda_config
    && !conda.packages.is_empty()
  {
    print_stat("Conda packages", &conda.packages.len().to_string());
  }
  if !graph.vscode_plugins.is_empty() {
    print_stat("VSCode extensions", &graph.vscode_plugins.len().to_string());
  }

  if !graph.exec.is_empty() {
    println!();
    println!("Steps:");
    for step in &graph.exec {
      println!("  {} {}", symbols::ARROW, step.commands.join(" && "));
    }
  }

  if !graph.runtime_expose.is_empty() {
    println!();
    println!("Ports:");
    for port in &graph.runtime_expose {
      let service = if port.service_name.is_empty() {
        String::new()
      } else {
        format!(" ({})", port.service_name)
      };
      println!(
        "  {} {} {} {}:{}{}",
        symbols::INFO,
        port.envd_port,
        symbols::ARROW,
        port.listening_addr,
        port.host_port,
        service
      );
    }
  }
}

fn print_batches(label: &str, batches: &[Vec<String>]) {
  if batches.is_empty() {
    return;
  }
  let count: usize = batches.iter().map(Vec::len).sum();
  print_stat(label, &format!("{} in {} batch(es)", count, batches.len()));
}
