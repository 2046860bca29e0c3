use ncserver_credentials::{
    find_host_key, CredentialConfig, CredentialError, CredentialProvider, HostKeyType, PasswdFile,
    TreeFile,
};
use ncserver_types::schema::*;
use ncserver_types::{ConfigTree, NodeId, NodeValue};
use pretty_assertions::assert_eq;

struct Keystore {
    tree: ConfigTree,
    identity: NodeId,
}

impl Keystore {
    /// A listen endpoint with an empty `server-identity`.
    fn new() -> Self {
        let mut tree = ConfigTree::new();
        let root = tree.add_root(NETCONF_SERVER);
        let listen = tree.add_container(root, LISTEN);
        let endpoint = tree.add_container(listen, ENDPOINT);
        tree.add_leaf(endpoint, NAME, NodeValue::String("default-ssh".into()));
        let ssh = tree.add_container(endpoint, SSH);
        let params = tree.add_container(ssh, SSH_SERVER_PARAMETERS);
        let identity = tree.add_container(params, SERVER_IDENTITY);
        Self { tree, identity }
    }

    fn key(&mut self, name: &str, algorithm: Option<&str>, private_key: Option<&str>) {
        let entry = self.tree.add_container(self.identity, HOST_KEY);
        self.tree.add_leaf(entry, NAME, NodeValue::String(name.into()));
        let public = self.tree.add_container(entry, PUBLIC_KEY);
        let local = self.tree.add_container(public, LOCAL_DEFINITION);
        if let Some(alg) = algorithm {
            self.tree
                .add_leaf(local, ALGORITHM, NodeValue::Identityref(alg.into()));
        }
        if let Some(key) = private_key {
            self.tree
                .add_leaf(local, PRIVATE_KEY, NodeValue::Binary(key.into()));
        }
    }
}

// ── Lookup ───────────────────────────────────────────────────────

#[test]
fn resolves_rsa_and_ecdsa_keys() {
    let mut ks = Keystore::new();
    ks.key("rsa-key", Some("ietf-crypto-types:rsa2048"), Some("MIIEpA"));
    ks.key("ec-key", Some("secp384r1"), Some("MHcCAQ"));

    let rsa = find_host_key(&ks.tree, "rsa-key").unwrap();
    assert_eq!(rsa.key_type, HostKeyType::Rsa);
    assert_eq!(rsa.private_key.expose(), "MIIEpA");

    let ec = find_host_key(&ks.tree, "ec-key").unwrap();
    assert_eq!(ec.key_type, HostKeyType::Ecdsa);
}

#[test]
fn missing_key_is_not_found() {
    let ks = Keystore::new();
    assert!(matches!(
        find_host_key(&ks.tree, "absent"),
        Err(CredentialError::HostKeyNotFound(name)) if name == "absent"
    ));
}

#[test]
fn incomplete_definition_is_an_error() {
    let mut ks = Keystore::new();
    ks.key("no-alg", None, Some("data"));
    ks.key("no-priv", Some("rsa2048"), None);

    assert!(matches!(
        find_host_key(&ks.tree, "no-alg"),
        Err(CredentialError::IncompleteHostKey { missing: "algorithm", .. })
    ));
    assert!(matches!(
        find_host_key(&ks.tree, "no-priv"),
        Err(CredentialError::IncompleteHostKey { missing: "private-key", .. })
    ));
}

#[test]
fn unknown_algorithm_is_an_error() {
    let mut ks = Keystore::new();
    ks.key("ed", Some("ed25519"), Some("data"));
    assert!(matches!(
        find_host_key(&ks.tree, "ed"),
        Err(CredentialError::UnknownAlgorithm(alg)) if alg == "ed25519"
    ));
}

#[test]
fn private_key_debug_is_redacted() {
    let mut ks = Keystore::new();
    ks.key("k", Some("rsa4096"), Some("super-secret"));
    let key = find_host_key(&ks.tree, "k").unwrap();
    let debug = format!("{key:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("REDACTED"));
}

// ── Provider ─────────────────────────────────────────────────────

#[test]
fn provider_reads_tree_file_on_every_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("running.json");
    let mut ks = Keystore::new();
    std::fs::write(&path, serde_json::to_string(&ks.tree).unwrap()).unwrap();

    let provider = CredentialProvider::new(
        PasswdFile::new(dir.path().join("passwd")),
        TreeFile::new(&path),
        CredentialConfig::default(),
    );
    assert!(provider.resolve_host_key("k").is_err());

    ks.key("k", Some("secp256r1"), Some("data"));
    std::fs::write(&path, serde_json::to_string(&ks.tree).unwrap()).unwrap();
    assert_eq!(provider.resolve_host_key("k").unwrap().key_type, HostKeyType::Ecdsa);
}

#[test]
fn unreadable_tree_file_fails_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CredentialProvider::new(
        PasswdFile::new(dir.path().join("passwd")),
        TreeFile::new(dir.path().join("missing.json")),
        CredentialConfig::default(),
    );
    assert!(matches!(
        provider.resolve_host_key("k"),
        Err(CredentialError::Io { .. })
    ));
}
