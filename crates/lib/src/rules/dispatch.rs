//! Applying a rule call to a graph.

use tracing::debug;

use super::catalogue::RuleKind;
use super::params::{Bound, bind};
use super::value::Args;
use super::RuleError;
use crate::graph::{Graph, GraphError};

/// Resolve `qualified_name` and dispatch the call.
pub fn call(graph: &mut Graph, qualified_name: &str, args: Args) -> Result<(), RuleError> {
  let kind = RuleKind::lookup(qualified_name).ok_or_else(|| RuleError::UnknownRule(qualified_name.to_string()))?;
  dispatch(graph, kind, args)
}

/// Bind `args` against the rule's parameters and apply exactly one graph
/// operation. On error the graph is unchanged.
pub fn dispatch(graph: &mut Graph, kind: RuleKind, args: Args) -> Result<(), RuleError> {
  let rule = kind.qualified_name();
  let a = bind(rule, kind.params(), args)?;
  debug!(rule, args = ?a, "rule invoked");

  apply(graph, kind, &a).map_err(|e| match e {
    Failure::Rule(e) => e,
    Failure::Graph(source) => RuleError::Graph { rule, source },
  })
}

enum Failure {
  Rule(RuleError),
  Graph(GraphError),
}

impl From<RuleError> for Failure {
  fn from(e: RuleError) -> Self {
    Failure::Rule(e)
  }
}

impl From<GraphError> for Failure {
  fn from(e: GraphError) -> Self {
    Failure::Graph(e)
  }
}

fn apply(g: &mut Graph, kind: RuleKind, a: &Bound) -> Result<(), Failure> {
  match kind {
    RuleKind::Python => {
      g.python(a.str("version"))?;
    }
    RuleKind::Conda => {
      g.conda(a.bool("use_mamba"));
    }
    RuleKind::Uv => {
      g.uv(a.str("python_version"));
    }
    RuleKind::Pixi => {
      g.pixi(a.bool("use_pixi_mirror"), a.str("pypi_index"));
    }
    RuleKind::RLang => {
      g.r_lang();
    }
    RuleKind::Julia => {
      g.julia();
    }
    RuleKind::AptPackages => {
      g.system_packages(a.strings("name"));
    }
    RuleKind::PythonPackages => {
      g.pypi_packages(a.strings("name"), a.str("requirements"), a.strings("local_wheels"));
    }
    RuleKind::CondaPackages => {
      g.conda_packages(a.strings("name"), a.strings("channel"), a.str("env_file"))?;
    }
    RuleKind::RPackages => {
      g.r_packages(a.strings("name"))?;
    }
    RuleKind::JuliaPackages => {
      g.julia_packages(a.strings("name"))?;
    }
    RuleKind::Cuda => {
      g.cuda(a.str("version"), a.str("cudnn"));
    }
    RuleKind::VscodeExtensions => {
      g.vscode_plugins(&a.strings("name"))?;
    }
    RuleKind::Base => {
      g.base(a.str("image"), a.bool("dev"));
    }
    RuleKind::Shell => {
      g.shell(a.str("name"));
    }
    RuleKind::Run => {
      g.run(a.strings("commands"), a.bool("mount_host"));
    }
    RuleKind::Git => {
      g.git(a.str("name"), a.str("email"), a.str("editor"));
    }
    RuleKind::Jupyter => {
      let port = a.int("port")?;
      g.jupyter(a.str("token"), port);
    }
    RuleKind::RStudioServer => {
      g.rstudio_server();
    }
    RuleKind::AptSource => {
      g.ubuntu_apt(a.str("source"))?;
    }
    RuleKind::PipIndex => {
      g.pypi_index(a.str("url"), a.str("extra_url"), a.bool("allow_insecure"))?;
    }
    RuleKind::CranMirror => {
      g.cran_mirror(a.str("url"));
    }
    RuleKind::JuliaPkgServer => {
      g.julia_package_server(a.str("url"));
    }
    RuleKind::CondaChannel => {
      g.conda_channel(a.str("channel"))?;
    }
    RuleKind::Gpu => {
      let count = a.int("count")?;
      g.gpu(count);
    }
    RuleKind::Shm => {
      let size = a.int("size")?;
      g.shm_size(size);
    }
    RuleKind::Entrypoint => {
      g.entrypoint(a.strings("args"));
    }
    RuleKind::Repo => {
      g.repo(a.str("url"), a.str("description"));
    }
    RuleKind::Owner => {
      let (uid, gid) = (a.int("uid")?, a.int("gid")?);
      g.owner(uid, gid);
    }
    RuleKind::RuntimeCommand => {
      g.runtime_commands(a.map("commands"));
    }
    RuleKind::RuntimeDaemon => {
      g.runtime_daemon(a.string_lists("commands"));
    }
    RuleKind::RuntimeExpose => {
      let (envd_port, host_port) = (a.int("envd_port")?, a.int("host_port")?);
      g.runtime_expose(envd_port, host_port, a.str("service"), a.str("listen_addr"));
    }
    RuleKind::RuntimeEnviron => {
      g.runtime_environ(a.map("env"), a.strings("extra_path"));
    }
    RuleKind::RuntimeInit => {
      g.runtime_init_script(a.strings("commands"));
    }
    RuleKind::RuntimeMount => {
      g.mount(a.str("host_path"), a.str("envd_path"));
    }
    RuleKind::Copy => {
      g.copy(a.str("source"), a.str("target"), a.str("image"));
    }
    RuleKind::Http => {
      g.http(a.str("url"), a.str("checksum"), a.str("filename"))?;
    }
  }
  Ok(())
}
