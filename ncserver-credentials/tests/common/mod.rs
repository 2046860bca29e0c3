//! Passwd and home-directory fixtures.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ncserver_credentials::{CredentialConfig, PasswdFile};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway passwd file plus home directories.
pub struct Accounts {
    pub dir: TempDir,
    lines: Vec<Vec<u8>>,
}

impl Accounts {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            lines: Vec::new(),
        }
    }

    /// Adds an account whose home directory exists but is empty.
    pub fn user(&mut self, name: &str) -> PathBuf {
        let home = self.dir.path().join("home").join(name);
        fs::create_dir_all(&home).unwrap();
        self.lines.push(format!(
            "{name}:x:{uid}:{uid}:{name}:{home}:/bin/sh",
            uid = 1000 + self.lines.len(),
            home = home.display()
        )
        .into_bytes());
        home
    }

    /// Adds an account with the given `authorized_keys` contents.
    pub fn user_with_keys(&mut self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let home = self.user(name);
        fs::create_dir_all(home.join(".ssh")).unwrap();
        fs::write(home.join(".ssh/authorized_keys"), contents).unwrap();
        home
    }

    /// Appends a passwd line verbatim, which need not be UTF-8.
    pub fn raw_line(&mut self, line: impl AsRef<[u8]>) {
        self.lines.push(line.as_ref().to_vec());
    }

    /// Writes the passwd file and returns a source and config pointing at it.
    pub fn finish(&self) -> (PasswdFile, CredentialConfig) {
        let path = self.dir.path().join("passwd");
        let mut contents = self.lines.join(&b'\n');
        contents.push(b'\n');
        fs::write(&path, contents).unwrap();
        let config = CredentialConfig {
            passwd_path: path.clone(),
            ..CredentialConfig::default()
        };
        (PasswdFile::new(path), config)
    }
}

/// Base64 wire blob of a key with the given algorithm and body.
pub fn key_data(algorithm: &str, body: &[u8]) -> String {
    let mut bytes = (algorithm.len() as u32).to_be_bytes().to_vec();
    bytes.extend_from_slice(algorithm.as_bytes());
    bytes.extend_from_slice(body);
    BASE64.encode(bytes)
}
