mod common;

use common::{key_data, Accounts};
use ncserver_credentials::{
    AccountSource, AuthDecision, CredentialConfig, CredentialProvider, KeyAlgorithm, PublicKey,
};
use ncserver_types::ConfigTree;

fn offer(algorithm: KeyAlgorithm, body: &[u8]) -> PublicKey {
    PublicKey::decode(algorithm, &key_data(algorithm.as_str(), body)).unwrap()
}

fn provider(accounts: &Accounts) -> CredentialProvider<ncserver_credentials::PasswdFile, ConfigTree> {
    let (source, config) = accounts.finish();
    CredentialProvider::new(source, ConfigTree::new(), config)
}

// ── Accounts ─────────────────────────────────────────────────────

#[test]
fn lookup_skips_malformed_lines() {
    let mut accounts = Accounts::new();
    accounts.raw_line("# comment");
    accounts.raw_line("broken:line");
    accounts.user("alice");
    let (source, _) = accounts.finish();

    assert_eq!(source.lookup("alice").unwrap().unwrap().name, "alice");
    assert!(source.lookup("broken").unwrap().is_none());
    assert_eq!(source.accounts().unwrap().count(), 1);
}

#[test]
fn non_utf8_gecos_does_not_stop_lookup() {
    let mut accounts = Accounts::new();
    accounts.raw_line(b"jose:x:999:999:Jos\xe9:/home/jose:/bin/sh");
    accounts.raw_line(b"jos\xe9:x:998:998::/home/jos:/bin/sh");
    accounts.user("alice");
    let (source, _) = accounts.finish();

    assert_eq!(source.lookup("alice").unwrap().unwrap().name, "alice");
    assert_eq!(source.lookup("jose").unwrap().unwrap().home, std::path::PathBuf::from("/home/jose"));
    assert_eq!(source.accounts().unwrap().count(), 2);
}

#[test]
fn missing_passwd_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = ncserver_credentials::PasswdFile::new(dir.path().join("passwd"));
    assert!(source.accounts().is_err());
}

// ── Public-key authentication ────────────────────────────────────

#[test]
fn first_key_matches() {
    let mut accounts = Accounts::new();
    let line = format!("ssh-rsa {} alice@laptop\n", key_data("ssh-rsa", b"alice-1"));
    accounts.user_with_keys("alice", &line);

    let decision = provider(&accounts).authenticate_public_key("alice", &offer(KeyAlgorithm::Rsa, b"alice-1"));
    assert_eq!(decision, AuthDecision::Accept);
}

#[test]
fn different_key_is_rejected() {
    let mut accounts = Accounts::new();
    let line = format!("ssh-rsa {}\n", key_data("ssh-rsa", b"alice-1"));
    accounts.user_with_keys("alice", &line);

    let decision = provider(&accounts).authenticate_public_key("alice", &offer(KeyAlgorithm::Rsa, b"mallory"));
    assert_eq!(decision, AuthDecision::Reject);
}

#[test]
fn only_first_entry_is_checked_by_default() {
    let mut accounts = Accounts::new();
    let contents = format!(
        "# keys\n\nssh-rsa {}\necdsa-sha2-nistp256 {}\n",
        key_data("ssh-rsa", b"first"),
        key_data("ecdsa-sha2-nistp256", b"second")
    );
    accounts.user_with_keys("alice", &contents);
    let second = offer(KeyAlgorithm::EcdsaNistp256, b"second");

    assert_eq!(
        provider(&accounts).authenticate_public_key("alice", &second),
        AuthDecision::Reject
    );

    let (source, config) = accounts.finish();
    let any = CredentialProvider::new(
        source,
        ConfigTree::new(),
        CredentialConfig {
            match_any_authorized_key: true,
            ..config
        },
    );
    assert_eq!(any.authenticate_public_key("alice", &second), AuthDecision::Accept);
}

#[test]
fn undecodable_entries_are_skipped_when_finding_first() {
    let mut accounts = Accounts::new();
    let contents = format!(
        "ssh-rsa not-base64!\nssh-dss {}\n",
        key_data("ssh-dss", b"good")
    );
    accounts.user_with_keys("bob", &contents);

    assert_eq!(
        provider(&accounts).authenticate_public_key("bob", &offer(KeyAlgorithm::Dss, b"good")),
        AuthDecision::Accept
    );
}

#[test]
fn latin1_comment_does_not_hide_keys() {
    let mut accounts = Accounts::new();
    let mut contents = b"# caf\xe9 laptop\n".to_vec();
    contents.extend_from_slice(format!("ssh-rsa {} bob\n", key_data("ssh-rsa", b"bob-1")).as_bytes());
    accounts.user_with_keys("bob", &contents);

    assert_eq!(
        provider(&accounts).authenticate_public_key("bob", &offer(KeyAlgorithm::Rsa, b"bob-1")),
        AuthDecision::Accept
    );
}

#[test]
fn unknown_user_is_rejected() {
    let accounts = Accounts::new();
    assert_eq!(
        provider(&accounts).authenticate_public_key("nobody", &offer(KeyAlgorithm::Rsa, b"x")),
        AuthDecision::Reject
    );
}

#[test]
fn user_without_key_file_is_rejected() {
    let mut accounts = Accounts::new();
    accounts.user("carol");
    assert_eq!(
        provider(&accounts).authenticate_public_key("carol", &offer(KeyAlgorithm::Rsa, b"x")),
        AuthDecision::Reject
    );
}

#[test]
fn empty_key_file_is_rejected() {
    let mut accounts = Accounts::new();
    accounts.user_with_keys("dave", "# nothing here\n");
    assert_eq!(
        provider(&accounts).authenticate_public_key("dave", &offer(KeyAlgorithm::Rsa, b"x")),
        AuthDecision::Reject
    );
}

#[test]
fn from_openssh_accepts_options_prefix() {
    let line = format!("command=\"true\" ssh-rsa {} c", key_data("ssh-rsa", b"k"));
    let key = PublicKey::from_openssh(&line).unwrap();
    assert_eq!(key.algorithm(), KeyAlgorithm::Rsa);
    assert!(PublicKey::from_openssh("garbage").is_err());
}
