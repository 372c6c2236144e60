//! The rule catalogue.
//!
//! [`RuleKind`] is the closed set of rules a script can call. Adding a rule
//! means adding a variant, its row in [`RULES`], its parameter list, and its
//! arm in [`dispatch`](super::dispatch); the compiler flags any arm that is
//! missing.

use serde::Serialize;

use super::params::{ParamDefault, ParamKind, ParamSpec};
use crate::consts::{
  DEFAULT_BASE_IMAGE, DEFAULT_CRAN_MIRROR, DEFAULT_JUPYTER_PORT, DEFAULT_LISTEN_ADDR, DEFAULT_SHELL,
  PYTHON_VERSION_DEFAULT,
};

/// Where a rule lives in the script's global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
  Global,
  Install,
  Config,
  Runtime,
  Io,
}

impl Namespace {
  /// Table name in the script, `None` for globals.
  pub fn table(self) -> Option<&'static str> {
    match self {
      Namespace::Global => None,
      Namespace::Install => Some("install"),
      Namespace::Config => Some("config"),
      Namespace::Runtime => Some("runtime"),
      Namespace::Io => Some("io"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
  Language,
  Package,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
  // install: language
  Python,
  Conda,
  Uv,
  Pixi,
  RLang,
  Julia,
  // install: packages
  AptPackages,
  PythonPackages,
  CondaPackages,
  RPackages,
  JuliaPackages,
  // install: other
  Cuda,
  VscodeExtensions,
  // global
  Base,
  Shell,
  Run,
  // config
  Git,
  Jupyter,
  RStudioServer,
  AptSource,
  PipIndex,
  CranMirror,
  JuliaPkgServer,
  CondaChannel,
  Gpu,
  Shm,
  Entrypoint,
  Repo,
  Owner,
  // runtime
  RuntimeCommand,
  RuntimeDaemon,
  RuntimeExpose,
  RuntimeEnviron,
  RuntimeInit,
  RuntimeMount,
  // io
  Copy,
  Http,
}

struct RuleRow {
  kind: RuleKind,
  qualified_name: &'static str,
  namespace: Namespace,
  category: RuleCategory,
}

const fn row(kind: RuleKind, qualified_name: &'static str, namespace: Namespace, category: RuleCategory) -> RuleRow {
  RuleRow {
    kind,
    qualified_name,
    namespace,
    category,
  }
}

use Namespace::{Config, Global, Install, Io, Runtime};
use RuleCategory::{Language, Other, Package};

/// Name → rule table, in catalogue order. Row `i` describes the variant with
/// discriminant `i`.
const RULES: &[RuleRow] = &[
  row(RuleKind::Python, "install.python", Install, Language),
  row(RuleKind::Conda, "install.conda", Install, Language),
  row(RuleKind::Uv, "install.uv", Install, Language),
  row(RuleKind::Pixi, "install.pixi", Install, Language),
  row(RuleKind::RLang, "install.r_lang", Install, Language),
  row(RuleKind::Julia, "install.julia", Install, Language),
  row(RuleKind::AptPackages, "install.apt_packages", Install, Package),
  row(RuleKind::PythonPackages, "install.python_packages", Install, Package),
  row(RuleKind::CondaPackages, "install.conda_packages", Install, Package),
  row(RuleKind::RPackages, "install.r_packages", Install, Package),
  row(RuleKind::JuliaPackages, "install.julia_packages", Install, Package),
  row(RuleKind::Cuda, "install.cuda", Install, Other),
  row(RuleKind::VscodeExtensions, "install.vscode_extensions", Install, Other),
  row(RuleKind::Base, "base", Global, Other),
  row(RuleKind::Shell, "shell", Global, Other),
  row(RuleKind::Run, "run", Global, Other),
  row(RuleKind::Git, "config.git", Config, Other),
  row(RuleKind::Jupyter, "config.jupyter", Config, Other),
  row(RuleKind::RStudioServer, "config.rstudio_server", Config, Other),
  row(RuleKind::AptSource, "config.apt_source", Config, Other),
  row(RuleKind::PipIndex, "config.pip_index", Config, Other),
  row(RuleKind::CranMirror, "config.cran_mirror", Config, Other),
  row(RuleKind::JuliaPkgServer, "config.julia_pkg_server", Config, Other),
  row(RuleKind::CondaChannel, "config.conda_channel", Config, Other),
  row(RuleKind::Gpu, "config.gpu", Config, Other),
  row(RuleKind::Shm, "config.shm", Config, Other),
  row(RuleKind::Entrypoint, "config.entrypoint", Config, Other),
  row(RuleKind::Repo, "config.repo", Config, Other),
  row(RuleKind::Owner, "config.owner", Config, Other),
  row(RuleKind::RuntimeCommand, "runtime.command", Runtime, Other),
  row(RuleKind::RuntimeDaemon, "runtime.daemon", Runtime, Other),
  row(RuleKind::RuntimeExpose, "runtime.expose", Runtime, Other),
  row(RuleKind::RuntimeEnviron, "runtime.environ", Runtime, Other),
  row(RuleKind::RuntimeInit, "runtime.init", Runtime, Other),
  row(RuleKind::RuntimeMount, "runtime.mount", Runtime, Other),
  row(RuleKind::Copy, "io.copy", Io, Other),
  row(RuleKind::Http, "io.http", Io, Other),
];

const _: () = {
  assert!(RULES.len() == RuleKind::Http as usize + 1);
  let mut i = 0;
  while i < RULES.len() {
    assert!(RULES[i].kind as usize == i, "RULES is out of declaration order");
    i += 1;
  }
};

use ParamKind::{Bool, Int, Str, StrList, StrListList, StrMap};

const NO_PARAMS: &[ParamSpec] = &[];
const PYTHON: &[ParamSpec] = &[ParamSpec::with_default(
  "version",
  Str,
  ParamDefault::Str(PYTHON_VERSION_DEFAULT),
)];
const CONDA: &[ParamSpec] = &[ParamSpec::with_default("use_mamba", Bool, ParamDefault::Bool(false))];
const UV: &[ParamSpec] = &[ParamSpec::with_default(
  "python_version",
  Str,
  ParamDefault::Str(PYTHON_VERSION_DEFAULT),
)];
const PIXI: &[ParamSpec] = &[
  ParamSpec::with_default("use_pixi_mirror", Bool, ParamDefault::Bool(false)),
  ParamSpec::optional("pypi_index", Str),
];
const APT_PACKAGES: &[ParamSpec] = &[ParamSpec::optional("name", StrList)];
const PYTHON_PACKAGES: &[ParamSpec] = &[
  ParamSpec::optional("name", StrList),
  ParamSpec::optional("requirements", Str),
  ParamSpec::optional("local_wheels", StrList),
];
const CONDA_PACKAGES: &[ParamSpec] = &[
  ParamSpec::optional("name", StrList),
  ParamSpec::optional("channel", StrList),
  ParamSpec::optional("env_file", Str),
];
const NAME_LIST: &[ParamSpec] = &[ParamSpec::required("name", StrList)];
const CUDA: &[ParamSpec] = &[ParamSpec::required("version", Str), ParamSpec::optional("cudnn", Str)];
const BASE: &[ParamSpec] = &[
  ParamSpec::with_default("image", Str, ParamDefault::Str(DEFAULT_BASE_IMAGE)),
  ParamSpec::with_default("dev", Bool, ParamDefault::Bool(false)),
];
const SHELL: &[ParamSpec] = &[ParamSpec::with_default("name", Str, ParamDefault::Str(DEFAULT_SHELL))];
const RUN: &[ParamSpec] = &[
  ParamSpec::required("commands", StrList),
  ParamSpec::with_default("mount_host", Bool, ParamDefault::Bool(false)),
];
const GIT: &[ParamSpec] = &[
  ParamSpec::optional("name", Str),
  ParamSpec::optional("email", Str),
  ParamSpec::optional("editor", Str),
];
const JUPYTER: &[ParamSpec] = &[
  ParamSpec::optional("token", Str),
  ParamSpec::with_default("port", Int, ParamDefault::Int(DEFAULT_JUPYTER_PORT)),
];
const APT_SOURCE: &[ParamSpec] = &[ParamSpec::optional("source", Str)];
const PIP_INDEX: &[ParamSpec] = &[
  ParamSpec::optional("url", Str),
  ParamSpec::optional("extra_url", Str),
  ParamSpec::with_default("allow_insecure", Bool, ParamDefault::Bool(false)),
];
const CRAN_MIRROR: &[ParamSpec] = &[ParamSpec::with_default("url", Str, ParamDefault::Str(DEFAULT_CRAN_MIRROR))];
const URL: &[ParamSpec] = &[ParamSpec::required("url", Str)];
const CONDA_CHANNEL: &[ParamSpec] = &[ParamSpec::required("channel", Str)];
const GPU: &[ParamSpec] = &[ParamSpec::required("count", Int)];
const SHM: &[ParamSpec] = &[ParamSpec::required("size", Int)];
const ENTRYPOINT: &[ParamSpec] = &[ParamSpec::required("args", StrList)];
const REPO: &[ParamSpec] = &[ParamSpec::required("url", Str), ParamSpec::optional("description", Str)];
const OWNER: &[ParamSpec] = &[ParamSpec::required("uid", Int), ParamSpec::required("gid", Int)];
const RUNTIME_COMMAND: &[ParamSpec] = &[ParamSpec::required("commands", StrMap)];
const RUNTIME_DAEMON: &[ParamSpec] = &[ParamSpec::required("commands", StrListList)];
const RUNTIME_EXPOSE: &[ParamSpec] = &[
  ParamSpec::required("envd_port", Int),
  ParamSpec::with_default("host_port", Int, ParamDefault::Int(0)),
  ParamSpec::optional("service", Str),
  ParamSpec::with_default("listen_addr", Str, ParamDefault::Str(DEFAULT_LISTEN_ADDR)),
];
const RUNTIME_ENVIRON: &[ParamSpec] = &[
  ParamSpec::optional("env", StrMap),
  ParamSpec::optional("extra_path", StrList),
];
const RUNTIME_INIT: &[ParamSpec] = &[ParamSpec::required("commands", StrList)];
const RUNTIME_MOUNT: &[ParamSpec] = &[
  ParamSpec::required("host_path", Str),
  ParamSpec::required("envd_path", Str),
];
const COPY: &[ParamSpec] = &[
  ParamSpec::required("source", Str),
  ParamSpec::required("target", Str),
  ParamSpec::optional("image", Str),
];
const HTTP: &[ParamSpec] = &[
  ParamSpec::required("url", Str),
  ParamSpec::optional("checksum", Str),
  ParamSpec::optional("filename", Str),
];

impl RuleKind {
  /// Every rule, in catalogue order.
  pub fn all() -> impl Iterator<Item = RuleKind> {
    RULES.iter().map(|r| r.kind)
  }

  /// Resolve a qualified name such as `install.python` or `base`.
  pub fn lookup(qualified_name: &str) -> Option<RuleKind> {
    RULES.iter().find(|r| r.qualified_name == qualified_name).map(|r| r.kind)
  }

  fn row(self) -> &'static RuleRow {
    &RULES[self as usize]
  }

  pub fn qualified_name(self) -> &'static str {
    self.row().qualified_name
  }

  /// Name within the rule's namespace table.
  pub fn name(self) -> &'static str {
    let qualified = self.qualified_name();
    qualified.rsplit_once('.').map_or(qualified, |(_, name)| name)
  }

  pub fn namespace(self) -> Namespace {
    self.row().namespace
  }

  pub fn category(self) -> RuleCategory {
    self.row().category
  }

  pub fn params(self) -> &'static [ParamSpec] {
    match self {
      RuleKind::Python => PYTHON,
      RuleKind::Conda => CONDA,
      RuleKind::Uv => UV,
      RuleKind::Pixi => PIXI,
      RuleKind::RLang | RuleKind::Julia | RuleKind::RStudioServer => NO_PARAMS,
      RuleKind::AptPackages => APT_PACKAGES,
      RuleKind::PythonPackages => PYTHON_PACKAGES,
      RuleKind::CondaPackages => CONDA_PACKAGES,
      RuleKind::RPackages | RuleKind::JuliaPackages | RuleKind::VscodeExtensions => NAME_LIST,
      RuleKind::Cuda => CUDA,
      RuleKind::Base => BASE,
      RuleKind::Shell => SHELL,
      RuleKind::Run => RUN,
      RuleKind::Git => GIT,
      RuleKind::Jupyter => JUPYTER,
      RuleKind::AptSource => APT_SOURCE,
      RuleKind::PipIndex => PIP_INDEX,
      RuleKind::CranMirror => CRAN_MIRROR,
      RuleKind::JuliaPkgServer => URL,
      RuleKind::CondaChannel => CONDA_CHANNEL,
      RuleKind::Gpu => GPU,
      RuleKind::Shm => SHM,
      RuleKind::Entrypoint => ENTRYPOINT,
      RuleKind::Repo => REPO,
      RuleKind::Owner => OWNER,
      RuleKind::RuntimeCommand => RUNTIME_COMMAND,
      RuleKind::RuntimeDaemon => RUNTIME_DAEMON,
      RuleKind::RuntimeExpose => RUNTIME_EXPOSE,
      RuleKind::RuntimeEnviron => RUNTIME_ENVIRON,
      RuleKind::RuntimeInit => RUNTIME_INIT,
      RuleKind::RuntimeMount => RUNTIME_MOUNT,
      RuleKind::Copy => COPY,
      RuleKind::Http => HTTP,
    }
  }
}

impl std::fmt::Display for RuleKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.qualified_name())
  }
}
