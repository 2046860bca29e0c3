//! Account enumeration.
//!
//! An [`AccountCursor`] owns whatever handle the source needs while it is
//! iterated; dropping it (including on early return) releases the handle.

use crate::error::{CredentialError, CredentialResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A local account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub home: PathBuf,
}

/// A scoped pass over the account database.
pub type AccountCursor<'a> = Box<dyn Iterator<Item = CredentialResult<Account>> + 'a>;

/// A database of local accounts.
pub trait AccountSource {
    /// Opens a cursor over every account.
    fn accounts(&self) -> CredentialResult<AccountCursor<'_>>;

    /// Looks up one account by name.
    fn lookup(&self, name: &str) -> CredentialResult<Option<Account>> {
        for account in self.accounts()? {
            let account = account?;
            if account.name == name {
                return Ok(Some(account));
            }
        }
        Ok(None)
    }
}

/// Accounts read from a file in `passwd(5)` format.
#[derive(Debug, Clone)]
pub struct PasswdFile {
    path: PathBuf,
}

impl PasswdFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountSource for PasswdFile {
    fn accounts(&self) -> CredentialResult<AccountCursor<'_>> {
        let file = File::open(&self.path).map_err(|e| CredentialError::io(&self.path, e))?;
        let path = self.path.as_path();
        let cursor = BufReader::new(file)
            .split(b'\n')
            .enumerate()
            .filter_map(move |(index, line)| match line {
                Ok(line) => parse_passwd_line(&line).map(Ok).or_else(|| {
                    if !line.trim_ascii().is_empty() && !line.starts_with(b"#") {
                        debug!("Skipping malformed passwd line {} in {}", index + 1, path.display());
                    }
                    None
                }),
                Err(e) => Some(Err(CredentialError::io(path, e))),
            });
        Ok(Box::new(cursor))
    }
}

/// `name:password:uid:gid:gecos:home:shell`
///
/// Only the name and home fields have to be UTF-8; the others are never
/// decoded.
fn parse_passwd_line(line: &[u8]) -> Option<Account> {
    if line.starts_with(b"#") {
        return None;
    }
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let fields: Vec<&[u8]> = line.split(|b| *b == b':').collect();
    if fields.len() < 7 || fields[0].is_empty() || fields[5].is_empty() {
        return None;
    }
    let name = std::str::from_utf8(fields[0]).ok()?;
    let home = std::str::from_utf8(fields[5]).ok()?;
    Some(Account {
        name: name.to_string(),
        home: PathBuf::from(home),
    })
}
