//! VSCode extension specifiers.
//!
//! Extensions are written `<publisher>.<extension>[-<version>]`, matching the
//! identifiers used by the extension marketplace:
//!
//! ```text
//! ms-python.python
//! ms-python.python-2021.10.1317843341
//! ms-toolsai.jupyter-keymap
//! ```
//!
//! A trailing `-<suffix>` is only a version when the suffix is a dotted
//! number, so hyphenated extension names like `jupyter-keymap` stay intact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
  #[error("cannot parse the publisher of vscode extension {0:?}")]
  MissingPublisher(String),

  #[error("cannot parse the extension name of vscode extension {0:?}")]
  MissingExtension(String),

  #[error("vscode extension {0:?} contains whitespace")]
  Whitespace(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VsCodePlugin {
  pub publisher: String,
  pub extension: String,
  pub version: Option<String>,
}

impl VsCodePlugin {
  pub fn parse(spec: &str) -> Result<Self, PluginError> {
    if spec.chars().any(char::is_whitespace) {
      return Err(PluginError::Whitespace(spec.to_string()));
    }

    let (publisher, rest) = spec
      .split_once('.')
      .ok_or_else(|| PluginError::MissingPublisher(spec.to_string()))?;
    if publisher.is_empty() {
      return Err(PluginError::MissingPublisher(spec.to_string()));
    }

    let (extension, version) = match rest.rsplit_once('-') {
      Some((extension, version)) if is_version(version) => (extension, Some(version.to_string())),
      _ => (rest, None),
    };
    if extension.is_empty() {
      return Err(PluginError::MissingExtension(spec.to_string()));
    }

    Ok(VsCodePlugin {
      publisher: publisher.to_string(),
      extension: extension.to_string(),
      version,
    })
  }
}

fn is_version(s: &str) -> bool {
  !s.is_empty() && s.split('.').all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

impl fmt::Display for VsCodePlugin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.publisher, self.extension)?;
    if let Some(version) = &self.version {
      write!(f, "-{}", version)?;
    }
    Ok(())
  }
}

impl FromStr for VsCodePlugin {
  type Err = PluginError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    VsCodePlugin::parse(s)
  }
}
