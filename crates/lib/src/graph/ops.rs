//! Graph operations, one per rule.

use std::collections::BTreeMap;

use tracing::debug;

use super::{
  CondaConfig, CopyInfo, ExposeItem, GitConfig, Graph, GraphError, HttpInfo, JupyterConfig, Language, LanguageLabel,
  LanguageName, MountInfo, PackageManager, PixiConfig, RStudioServerConfig, RepoInfo, RunBuildCommand, UvConfig,
};
use crate::digest::Digest;
use crate::vscode::VsCodePlugin;

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}

impl Graph {
  /// Set the base image and dev flag. An empty image keeps the current one.
  pub fn base(&mut self, image: &str, dev: bool) -> &mut Self {
    debug!(image, dev, "setting base");
    if !image.is_empty() {
      self.image = Some(image.to_string());
    }
    self.dev = dev;
    self
  }

  pub fn python(&mut self, version: &str) -> Result<&mut Self, GraphError> {
    if version.starts_with('2') {
      debug!(version, "rejecting python 2");
      return Err(GraphError::UnsupportedVersion {
        version: version.to_string(),
      });
    }
    self.languages.push(Language {
      name: LanguageName::Python,
      version: Some(version.to_string()),
    });
    Ok(self)
  }

  pub fn conda(&mut self, use_mamba: bool) -> &mut Self {
    self.conda_config = Some(CondaConfig {
      use_mamba,
      ..CondaConfig::default()
    });
    self
  }

  pub fn pixi(&mut self, use_pixi_mirror: bool, pypi_index: &str) -> &mut Self {
    self.pixi_config = Some(PixiConfig {
      use_pixi_mirror,
      pypi_index: non_empty(pypi_index),
    });
    self
  }

  pub fn uv(&mut self, python_version: &str) -> &mut Self {
    self.uv_config = Some(UvConfig {
      python_version: python_version.to_string(),
    });
    self
  }

  pub fn r_lang(&mut self) -> &mut Self {
    self.languages.push(Language {
      name: LanguageName::R,
      version: None,
    });
    self
  }

  pub fn julia(&mut self) -> &mut Self {
    self.languages.push(Language {
      name: LanguageName::Julia,
      version: None,
    });
    self
  }

  /// Add a PyPI batch, local wheels and an optional requirements file.
  ///
  /// An empty `deps` adds no batch, so `python_packages(requirements=...)`
  /// on its own leaves `pypi_packages` untouched.
  pub fn pypi_packages(&mut self, deps: Vec<String>, requirements: &str, wheels: Vec<String>) -> &mut Self {
    if !deps.is_empty() {
      self.pypi_packages.push(deps);
    }
    self.python_wheels.extend(wheels);
    if let Some(requirements) = non_empty(requirements) {
      self.requirements_file = Some(requirements);
    }
    self
  }

  pub fn r_packages(&mut self, deps: Vec<String>) -> Result<&mut Self, GraphError> {
    if deps.is_empty() {
      return Err(GraphError::EmptyDependencyList {
        language: LanguageLabel::R,
      });
    }
    self.r_packages.push(deps);
    Ok(self)
  }

  pub fn julia_packages(&mut self, deps: Vec<String>) -> Result<&mut Self, GraphError> {
    if deps.is_empty() {
      return Err(GraphError::EmptyDependencyList {
        language: LanguageLabel::Julia,
      });
    }
    self.julia_packages.push(deps);
    Ok(self)
  }

  pub fn system_packages(&mut self, deps: Vec<String>) -> &mut Self {
    self.system_packages.extend(deps);
    self
  }

  /// Add conda packages and channels, or an environment file.
  ///
  /// The environment file is replaced on every call, so a later call without
  /// one clears it. The exclusivity check runs before the prerequisite check, so a call that
  /// is wrong on both counts reports the argument conflict.
  pub fn conda_packages(
    &mut self,
    deps: Vec<String>,
    channels: Vec<String>,
    env_file: &str,
  ) -> Result<&mut Self, GraphError> {
    if !env_file.is_empty() && (!deps.is_empty() || !channels.is_empty()) {
      return Err(GraphError::MutuallyExclusiveArguments {
        first: "env_file",
        second: "name/channel",
      });
    }
    let conda = self.conda_config.as_mut().ok_or(GraphError::MissingPrerequisite {
      manager: PackageManager::Conda,
      action: "install conda packages",
    })?;

    conda.packages.extend(deps);
    conda.additional_channels.extend(channels);
    conda.env_file = non_empty(env_file);
    Ok(self)
  }

  pub fn conda_channel(&mut self, channel: &str) -> Result<&mut Self, GraphError> {
    let conda = self.conda_config.as_mut().ok_or(GraphError::MissingPrerequisite {
      manager: PackageManager::Conda,
      action: "configure conda channels",
    })?;
    conda.channel = Some(channel.to_string());
    Ok(self)
  }

  pub fn cuda(&mut self, version: &str, cudnn: &str) -> &mut Self {
    self.cuda = Some(version.to_string());
    if let Some(cudnn) = non_empty(cudnn) {
      self.cudnn = Some(cudnn);
    }
    self
  }

  /// Parse and append VSCode extensions. Nothing is appended unless every
  /// specifier parses.
  pub fn vscode_plugins(&mut self, specs: &[String]) -> Result<&mut Self, GraphError> {
    let plugins = specs
      .iter()
      .map(|spec| VsCodePlugin::parse(spec))
      .collect::<Result<Vec<_>, _>>()?;
    self.vscode_plugins.extend(plugins);
    Ok(self)
  }

  /// Replace the apt `sources.list` of the image.
  pub fn ubuntu_apt(&mut self, source: &str) -> Result<&mut Self, GraphError> {
    if source.is_empty() {
      return Err(GraphError::MissingRequiredValue { field: "source" });
    }
    self.ubuntu_apt_source = Some(source.to_string());
    Ok(self)
  }

  pub fn pypi_index(&mut self, url: &str, extra_url: &str, trust: bool) -> Result<&mut Self, GraphError> {
    if url.is_empty() {
      return Err(GraphError::MissingRequiredValue { field: "url" });
    }
    self.pypi_index_url = Some(url.to_string());
    if let Some(extra_url) = non_empty(extra_url) {
      self.pypi_extra_index_url = Some(extra_url);
    }
    self.pypi_trust = trust;
    Ok(self)
  }

  pub fn cran_mirror(&mut self, url: &str) -> &mut Self {
    self.cran_mirror_url = Some(url.to_string());
    self
  }

  pub fn julia_package_server(&mut self, url: &str) -> &mut Self {
    self.julia_package_server = Some(url.to_string());
    self
  }

  pub fn shell(&mut self, shell: &str) -> &mut Self {
    self.shell = shell.to_lowercase();
    self
  }

  pub fn jupyter(&mut self, token: &str, port: u16) -> &mut Self {
    self.jupyter_config = Some(JupyterConfig {
      token: token.to_string(),
      port,
    });
    self
  }

  pub fn rstudio_server(&mut self) -> &mut Self {
    self.rstudio_server_config = Some(RStudioServerConfig::default());
    self
  }

  pub fn run(&mut self, commands: Vec<String>, mount_host: bool) -> &mut Self {
    self.exec.push(RunBuildCommand { commands, mount_host });
    self
  }

  pub fn git(&mut self, name: &str, email: &str, editor: &str) -> &mut Self {
    self.git_config = Some(GitConfig {
      name: name.to_string(),
      email: email.to_string(),
      editor: editor.to_string(),
    });
    self
  }

  pub fn copy(&mut self, source: &str, destination: &str, image: &str) -> &mut Self {
    self.copy.push(CopyInfo {
      source: source.to_string(),
      destination: destination.to_string(),
      image: non_empty(image),
    });
    self
  }

  pub fn mount(&mut self, source: &str, destination: &str) -> &mut Self {
    self.mount.push(MountInfo {
      source: source.to_string(),
      destination: destination.to_string(),
    });
    self
  }

  /// Append an HTTP download. A non-empty checksum must be a valid digest.
  pub fn http(&mut self, url: &str, checksum: &str, filename: &str) -> Result<&mut Self, GraphError> {
    let checksum = match checksum {
      "" => None,
      s => Some(Digest::parse(s)?),
    };
    self.http.push(HttpInfo {
      url: url.to_string(),
      checksum,
      filename: non_empty(filename),
    });
    Ok(self)
  }

  pub fn entrypoint(&mut self, args: Vec<String>) -> &mut Self {
    self.entrypoint.extend(args);
    self
  }

  pub fn runtime_commands(&mut self, commands: BTreeMap<String, String>) -> &mut Self {
    self.runtime_commands.extend(commands);
    self
  }

  pub fn runtime_daemon(&mut self, commands: Vec<Vec<String>>) -> &mut Self {
    self.runtime_daemon.extend(commands);
    self
  }

  pub fn runtime_expose(
    &mut self,
    envd_port: u16,
    host_port: u16,
    service_name: &str,
    listening_addr: &str,
  ) -> &mut Self {
    self.runtime_expose.push(ExposeItem {
      envd_port,
      host_port,
      service_name: service_name.to_string(),
      listening_addr: listening_addr.to_string(),
    });
    self
  }

  pub fn runtime_environ(&mut self, env: BTreeMap<String, String>, paths: Vec<String>) -> &mut Self {
    self.runtime_environ.extend(env);
    self.runtime_env_paths.extend(paths);
    self
  }

  pub fn runtime_init_script(&mut self, commands: Vec<String>) -> &mut Self {
    self.runtime_init_script.push(commands);
    self
  }

  pub fn repo(&mut self, url: &str, description: &str) -> &mut Self {
    self.repo = RepoInfo {
      url: url.to_string(),
      description: description.to_string(),
    };
    self
  }

  pub fn owner(&mut self, uid: u32, gid: u32) -> &mut Self {
    self.uid = Some(uid);
    self.gid = Some(gid);
    self
  }

  pub fn gpu(&mut self, count: u32) -> &mut Self {
    self.num_gpus = Some(count);
    self
  }

  pub fn shm_size(&mut self, size_mb: u64) -> &mut Self {
    self.shm_size = Some(size_mb);
    self
  }
}
