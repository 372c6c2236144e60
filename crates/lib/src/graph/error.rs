use crate::digest::DigestError;
use crate::vscode::PluginError;

/// Validation failures raised by graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
  #[error("python {version} is not supported, use python 3")]
  UnsupportedVersion { version: String },

  #[error("cannot install an empty list of {language} packages")]
  EmptyDependencyList { language: LanguageLabel },

  #[error("cannot {action} when {manager} is not installed")]
  MissingPrerequisite { manager: PackageManager, action: &'static str },

  #[error("{first} and {second} are mutually exclusive")]
  MutuallyExclusiveArguments { first: &'static str, second: &'static str },

  #[error("invalid checksum: {0}")]
  InvalidDigest(#[from] DigestError),

  #[error("invalid vscode extension: {0}")]
  InvalidPluginSpecifier(#[from] PluginError),

  #[error("{field} is required")]
  MissingRequiredValue { field: &'static str },
}

/// Language whose package list was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageLabel {
  R,
  Julia,
}

impl std::fmt::Display for LanguageLabel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      LanguageLabel::R => f.write_str("R"),
      LanguageLabel::Julia => f.write_str("Julia"),
    }
  }
}

/// Package managers gated by an enabling rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
  Conda,
  Pixi,
  Uv,
}

impl std::fmt::Display for PackageManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PackageManager::Conda => f.write_str("conda"),
      PackageManager::Pixi => f.write_str("pixi"),
      PackageManager::Uv => f.write_str("uv"),
    }
  }
}
