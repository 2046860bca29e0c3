//! `authorized_keys` entries and public-key blobs.
//!
//! An entry is `[options] algorithm key-data [comment]`. The options field
//! is skipped by scanning for the first token that is a known algorithm.

use crate::error::{CredentialError, CredentialResult};
use crate::key_algorithm::KeyAlgorithm;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

/// One parsed `authorized_keys` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedKey {
    pub algorithm: KeyAlgorithm,
    /// Base64 key data exactly as written in the file.
    pub key_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl AuthorizedKey {
    /// Parses one line. Blank lines, comments and lines without a known
    /// algorithm followed by key data yield None.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let mut tokens = line.split_whitespace();
        let algorithm = tokens.by_ref().find_map(KeyAlgorithm::from_token)?;
        let key_data = tokens.next()?.to_string();
        let comment: Vec<&str> = tokens.collect();
        Some(Self {
            algorithm,
            key_data,
            comment: (!comment.is_empty()).then(|| comment.join(" ")),
        })
    }

    /// Decodes the key data.
    pub fn public_key(&self) -> CredentialResult<PublicKey> {
        PublicKey::decode(self.algorithm, &self.key_data)
    }
}

/// A decoded public key in SSH wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    algorithm: KeyAlgorithm,
    blob: Vec<u8>,
}

impl PublicKey {
    /// Decodes base64 key data and checks that the blob names `algorithm`.
    pub fn decode(algorithm: KeyAlgorithm, key_data: &str) -> CredentialResult<Self> {
        let blob = BASE64
            .decode(key_data)
            .map_err(|e| CredentialError::InvalidKey(format!("invalid base64: {e}")))?;

        let embedded = wire_algorithm(&blob)
            .ok_or_else(|| CredentialError::InvalidKey("truncated key blob".to_string()))?;
        if embedded != algorithm.as_str().as_bytes() {
            return Err(CredentialError::InvalidKey(format!(
                "blob is not a {algorithm} key"
            )));
        }
        Ok(Self { algorithm, blob })
    }

    /// Parses an `authorized_keys`-style line into a key.
    pub fn from_openssh(line: &str) -> CredentialResult<Self> {
        AuthorizedKey::parse_line(line)
            .ok_or_else(|| CredentialError::InvalidKey("no known algorithm and key data".to_string()))?
            .public_key()
    }

    /// Wraps an already-encoded wire blob, reading the algorithm from it.
    pub fn from_blob(blob: Vec<u8>) -> CredentialResult<Self> {
        let name = wire_algorithm(&blob)
            .and_then(|name| std::str::from_utf8(name).ok())
            .ok_or_else(|| CredentialError::InvalidKey("truncated key blob".to_string()))?;
        let algorithm = KeyAlgorithm::from_token(name)
            .ok_or_else(|| CredentialError::InvalidKey(format!("unsupported algorithm {name}")))?;
        Ok(Self { algorithm, blob })
    }

    #[must_use]
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Compares only the public parts of two keys.
    #[must_use]
    pub fn same_public_key(&self, other: &PublicKey) -> bool {
        self.algorithm == other.algorithm && self.blob == other.blob
    }
}

/// The leading length-prefixed string of an SSH key blob.
fn wire_algorithm(blob: &[u8]) -> Option<&[u8]> {
    let (len, rest) = blob.split_first_chunk::<4>()?;
    let len = usize::try_from(u32::from_be_bytes(*len)).ok()?;
    rest.get(..len)
}
