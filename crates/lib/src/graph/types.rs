use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PackageManager;
use crate::consts::DEFAULT_SHELL;
use crate::digest::Digest;
use crate::util::hash::Hashable;
use crate::vscode::VsCodePlugin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageName {
  Python,
  R,
  Julia,
}

impl LanguageName {
  pub fn as_str(self) -> &'static str {
    match self {
      LanguageName::Python => "python",
      LanguageName::R => "r",
      LanguageName::Julia => "julia",
    }
  }
}

/// A language runtime to install. Only Python carries a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
  pub name: LanguageName,
  pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondaConfig {
  pub use_mamba: bool,
  /// Channel configuration written to `.condarc`.
  pub channel: Option<String>,
  pub packages: Vec<String>,
  pub additional_channels: Vec<String>,
  /// Environment file; exclusive with explicit packages in the same call.
  pub env_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixiConfig {
  pub use_pixi_mirror: bool,
  pub pypi_index: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UvConfig {
  pub python_version: String,
}

/// Shell lines run as one build step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBuildCommand {
  pub commands: Vec<String>,
  /// Mount the build context read-only while the commands run.
  pub mount_host: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyInfo {
  pub source: String,
  pub destination: String,
  /// Copy from this image instead of the build context.
  pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountInfo {
  pub source: String,
  pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpInfo {
  pub url: String,
  pub checksum: Option<Digest>,
  pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposeItem {
  pub envd_port: u16,
  /// `0` lets the runtime pick a free host port.
  pub host_port: u16,
  pub service_name: String,
  pub listening_addr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
  pub name: String,
  pub email: String,
  pub editor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JupyterConfig {
  pub token: String,
  pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RStudioServerConfig {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
  pub url: String,
  pub description: String,
}

/// Lifecycle of a package manager within one evaluation.
///
/// There is no way back to `Disabled`: once a manager's enabling rule has run
/// its config persists until the evaluation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
  Disabled,
  Enabled,
  EnabledWithPackages,
}

/// The build graph for one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
  pub image: Option<String>,
  pub dev: bool,
  pub uid: Option<u32>,
  pub gid: Option<u32>,

  pub languages: Vec<Language>,

  pub conda_config: Option<CondaConfig>,
  pub pixi_config: Option<PixiConfig>,
  pub uv_config: Option<UvConfig>,

  pub pypi_packages: Vec<Vec<String>>,
  pub r_packages: Vec<Vec<String>>,
  pub julia_packages: Vec<Vec<String>>,
  pub system_packages: Vec<String>,
  pub python_wheels: Vec<String>,
  pub requirements_file: Option<String>,

  pub exec: Vec<RunBuildCommand>,
  pub copy: Vec<CopyInfo>,
  pub mount: Vec<MountInfo>,
  pub http: Vec<HttpInfo>,

  pub entrypoint: Vec<String>,
  pub runtime_commands: BTreeMap<String, String>,
  pub runtime_daemon: Vec<Vec<String>>,
  pub runtime_environ: BTreeMap<String, String>,
  pub runtime_env_paths: Vec<String>,
  pub runtime_init_script: Vec<Vec<String>>,
  pub runtime_expose: Vec<ExposeItem>,

  pub git_config: Option<GitConfig>,
  pub jupyter_config: Option<JupyterConfig>,
  pub rstudio_server_config: Option<RStudioServerConfig>,
  pub vscode_plugins: Vec<VsCodePlugin>,
  pub repo: RepoInfo,
  pub ubuntu_apt_source: Option<String>,
  pub pypi_index_url: Option<String>,
  pub pypi_extra_index_url: Option<String>,
  pub pypi_trust: bool,
  pub cran_mirror_url: Option<String>,
  pub julia_package_server: Option<String>,
  pub cuda: Option<String>,
  pub cudnn: Option<String>,
  /// Shared memory size in MB.
  pub shm_size: Option<u64>,
  pub num_gpus: Option<u32>,
  pub shell: String,
}

impl Default for Graph {
  fn default() -> Self {
    Graph {
      image: None,
      dev: false,
      uid: None,
      gid: None,
      languages: Vec::new(),
      conda_config: None,
      pixi_config: None,
      uv_config: None,
      pypi_packages: Vec::new(),
      r_packages: Vec::new(),
      julia_packages: Vec::new(),
      system_packages: Vec::new(),
      python_wheels: Vec::new(),
      requirements_file: None,
      exec: Vec::new(),
      copy: Vec::new(),
      mount: Vec::new(),
      http: Vec::new(),
      entrypoint: Vec::new(),
      runtime_commands: BTreeMap::new(),
      runtime_daemon: Vec::new(),
      runtime_environ: BTreeMap::new(),
      runtime_env_paths: Vec::new(),
      runtime_init_script: Vec::new(),
      runtime_expose: Vec::new(),
      git_config: None,
      jupyter_config: None,
      rstudio_server_config: None,
      vscode_plugins: Vec::new(),
      repo: RepoInfo::default(),
      ubuntu_apt_source: None,
      pypi_index_url: None,
      pypi_extra_index_url: None,
      pypi_trust: false,
      cran_mirror_url: None,
      julia_package_server: None,
      cuda: None,
      cudnn: None,
      shm_size: None,
      num_gpus: None,
      shell: DEFAULT_SHELL.to_string(),
    }
  }
}

impl Graph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn manager_state(&self, manager: PackageManager) -> ManagerState {
    match manager {
      PackageManager::Conda => match &self.conda_config {
        None => ManagerState::Disabled,
        Some(conda) if conda.packages.is_empty() && conda.env_file.is_none() => ManagerState::Enabled,
        Some(_) => ManagerState::EnabledWithPackages,
      },
      PackageManager::Pixi if self.pixi_config.is_some() => ManagerState::Enabled,
      PackageManager::Uv if self.uv_config.is_some() => ManagerState::Enabled,
      PackageManager::Pixi | PackageManager::Uv => ManagerState::Disabled,
    }
  }

  pub fn has_language(&self, name: LanguageName) -> bool {
    self.languages.iter().any(|l| l.name == name)
  }
}

impl Hashable for Graph {}
