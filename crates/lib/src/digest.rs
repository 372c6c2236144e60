//! Content digests for fetched artifacts.
//!
//! A digest is written `<algorithm>:<encoded>`, e.g.
//! `sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855`.
//! Parsing happens when the rule is called, so a typo in a checksum fails the
//! script instead of the download.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hash algorithms accepted in a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DigestAlgorithm {
  Sha256,
  Sha384,
  Sha512,
}

impl DigestAlgorithm {
  pub fn as_str(self) -> &'static str {
    match self {
      DigestAlgorithm::Sha256 => "sha256",
      DigestAlgorithm::Sha384 => "sha384",
      DigestAlgorithm::Sha512 => "sha512",
    }
  }

  /// Length of the hex-encoded hash.
  pub fn encoded_len(self) -> usize {
    match self {
      DigestAlgorithm::Sha256 => 64,
      DigestAlgorithm::Sha384 => 96,
      DigestAlgorithm::Sha512 => 128,
    }
  }

  fn from_name(name: &str) -> Option<Self> {
    match name {
      "sha256" => Some(DigestAlgorithm::Sha256),
      "sha384" => Some(DigestAlgorithm::Sha384),
      "sha512" => Some(DigestAlgorithm::Sha512),
      _ => None,
    }
  }
}

impl fmt::Display for DigestAlgorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
  #[error("invalid checksum digest format: {0:?}")]
  InvalidFormat(String),

  #[error("unsupported digest algorithm: {0}")]
  Unsupported(String),

  #[error("invalid checksum digest length for {algorithm}: expected {expected} hex characters, got {actual}")]
  InvalidLength {
    algorithm: DigestAlgorithm,
    expected: usize,
    actual: usize,
  },

  #[error("invalid checksum digest encoding: {0:?} is not lowercase hex")]
  InvalidEncoding(String),
}

/// A validated content digest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest {
  algorithm: DigestAlgorithm,
  encoded: String,
}

impl Digest {
  pub fn parse(s: &str) -> Result<Self, DigestError> {
    let Some((algorithm, encoded)) = s.split_once(':') else {
      return Err(DigestError::InvalidFormat(s.to_string()));
    };
    if algorithm.is_empty() || encoded.is_empty() {
      return Err(DigestError::InvalidFormat(s.to_string()));
    }

    let Some(algorithm) = DigestAlgorithm::from_name(algorithm) else {
      if !is_algorithm_identifier(algorithm) {
        return Err(DigestError::InvalidFormat(s.to_string()));
      }
      return Err(DigestError::Unsupported(algorithm.to_string()));
    };

    if encoded.len() != algorithm.encoded_len() {
      return Err(DigestError::InvalidLength {
        algorithm,
        expected: algorithm.encoded_len(),
        actual: encoded.len(),
      });
    }
    // hex::decode also accepts uppercase; digests are canonical lowercase.
    if encoded.bytes().any(|b| b.is_ascii_uppercase()) || hex::decode(encoded).is_err() {
      return Err(DigestError::InvalidEncoding(encoded.to_string()));
    }

    Ok(Digest {
      algorithm,
      encoded: encoded.to_string(),
    })
  }

  pub fn algorithm(&self) -> DigestAlgorithm {
    self.algorithm
  }

  pub fn encoded(&self) -> &str {
    &self.encoded
  }
}

/// `[a-z0-9]+([.+_-][a-z0-9]+)*`
fn is_algorithm_identifier(s: &str) -> bool {
  s.split(['.', '+', '_', '-'])
    .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

impl fmt::Display for Digest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.algorithm, self.encoded)
  }
}

impl FromStr for Digest {
  type Err = DigestError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Digest::parse(s)
  }
}

impl TryFrom<String> for Digest {
  type Error = DigestError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Digest::parse(&value)
  }
}

impl From<Digest> for String {
  fn from(digest: Digest) -> Self {
    digest.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EMPTY_SHA256: &str = "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

  #[test]
  fn parses_sha256() {
    let digest = Digest::parse(EMPTY_SHA256).unwrap();
    assert_eq!(digest.algorithm(), DigestAlgorithm::Sha256);
    assert_eq!(digest.to_string(), EMPTY_SHA256);
  }

  #[test]
  fn parses_sha512() {
    let encoded = "a".repeat(128);
    let digest = Digest::parse(&format!("sha512:{}", encoded)).unwrap();
    assert_eq!(digest.algorithm(), DigestAlgorithm::Sha512);
    assert_eq!(digest.encoded(), encoded);
  }

  #[test]
  fn rejects_missing_separator() {
    assert!(matches!(
      Digest::parse("e3b0c44298fc1c149afbf4c8996fb924"),
      Err(DigestError::InvalidFormat(_))
    ));
  }

  #[test]
  fn rejects_empty_parts() {
    assert!(matches!(Digest::parse(":abc"), Err(DigestError::InvalidFormat(_))));
    assert!(matches!(Digest::parse("sha256:"), Err(DigestError::InvalidFormat(_))));
  }

  #[test]
  fn rejects_unknown_algorithm() {
    assert_eq!(
      Digest::parse("md5:d41d8cd98f00b204e9800998ecf8427e"),
      Err(DigestError::Unsupported("md5".to_string()))
    );
  }

  #[test]
  fn malformed_algorithm_is_a_format_error() {
    assert!(matches!(Digest::parse("SHA256:abc"), Err(DigestError::InvalidFormat(_))));
    assert!(matches!(Digest::parse("sha-:abc"), Err(DigestError::InvalidFormat(_))));
  }

  #[test]
  fn rejects_wrong_length() {
    assert_eq!(
      Digest::parse("sha256:abc"),
      Err(DigestError::InvalidLength {
        algorithm: DigestAlgorithm::Sha256,
        expected: 64,
        actual: 3,
      })
    );
  }

  #[test]
  fn rejects_uppercase_and_non_hex() {
    let upper = EMPTY_SHA256.to_uppercase().replace("SHA256", "sha256");
    assert!(matches!(Digest::parse(&upper), Err(DigestError::InvalidEncoding(_))));

    let non_hex = format!("sha256:{}", "z".repeat(64));
    assert!(matches!(Digest::parse(&non_hex), Err(DigestError::InvalidEncoding(_))));
  }

  #[test]
  fn serializes_as_string() {
    let digest = Digest::parse(EMPTY_SHA256).unwrap();
    let json = serde_json::to_string(&digest).unwrap();
    assert_eq!(json, format!("\"{}\"", EMPTY_SHA256));

    let bad: Result<Digest, _> = serde_json::from_str("\"sha256:abc\"");
    assert!(bad.is_err());
  }
}
