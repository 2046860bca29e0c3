mod common;

use common::ServerTree;
use ncserver_model::{AuthMethod, AuthMethodSet};
use ncserver_reconcile::{BatchSummary, MemoryServer, ReconcileConfig, Reconciler, Subtree};
use ncserver_types::{ChangeBatch, EndpointTarget, NodeId, NodeValue};
use proptest::prelude::*;

struct Fixture {
    batch: ChangeBatch,
    methods: NodeId,
    ssh: NodeId,
}

fn fixture() -> Fixture {
    let mut t = ServerTree::new();
    let ep = t.listen_endpoint("ep1");
    let methods = t.auth_methods(ep);
    Fixture {
        batch: t.into_batch(),
        methods,
        ssh: ep.ssh,
    }
}

/// Creates endpoint ep1, then reconciles the auth-method changes `build` records.
fn apply(
    config: ReconcileConfig,
    build: impl FnOnce(&mut ChangeBatch, NodeId),
) -> (AuthMethodSet, BatchSummary) {
    let mut f = fixture();
    let mut runtime = MemoryServer::new();
    let reconciler = Reconciler::new(config);

    let mut setup = f.batch.clone();
    setup.created(f.ssh);
    reconciler
        .reconcile(Subtree::ListenSsh, &setup, &mut runtime)
        .unwrap();

    build(&mut f.batch, f.methods);
    let summary = reconciler
        .reconcile(Subtree::ListenAuthMethods, &f.batch, &mut runtime)
        .unwrap();
    let set = runtime
        .endpoint(&EndpointTarget::listen("ep1"))
        .unwrap()
        .auth_methods;
    (set, summary)
}

fn leaf(batch: &mut ChangeBatch, parent: NodeId, name: &str, value: NodeValue) -> NodeId {
    batch.tree_mut().add_leaf(parent, name, value)
}

// ── Flags ────────────────────────────────────────────────────────

#[test]
fn publickey_round_trip_restores_mask() {
    let (set, summary) = apply(ReconcileConfig::default(), |b, m| {
        let pk = leaf(b, m, "publickey", NodeValue::Empty);
        b.created(pk).deleted(pk);
    });
    assert_eq!(set, AuthMethodSet::empty());
    assert_eq!(summary.mutations, 2);
}

#[test]
fn publickey_created_sets_flag() {
    let (set, _) = apply(ReconcileConfig::default(), |b, m| {
        let pk = leaf(b, m, "publickey", NodeValue::Empty);
        b.created(pk);
    });
    assert!(set.contains(AuthMethod::PublicKey));
    assert!(!set.contains(AuthMethod::Password));
}

#[test]
fn triple_s_password_leaf_toggles_password() {
    let (set, _) = apply(ReconcileConfig::default(), |b, m| {
        let pw = leaf(b, m, "passsword", NodeValue::Empty);
        b.created(pw);
    });
    assert!(set.contains(AuthMethod::Password));
}

#[test]
fn password_leaf_ignored_by_default() {
    let (set, summary) = apply(ReconcileConfig::default(), |b, m| {
        let pw = leaf(b, m, "password", NodeValue::Empty);
        b.created(pw);
    });
    assert!(set.is_empty());
    assert_eq!(summary.ignored, 1);
}

#[test]
fn password_leaf_honored_when_configured() {
    let config = ReconcileConfig {
        honor_password_leaf: true,
        ..ReconcileConfig::default()
    };
    let (set, _) = apply(config, |b, m| {
        let pw = leaf(b, m, "password", NodeValue::Empty);
        b.created(pw);
    });
    assert!(set.contains(AuthMethod::Password));
}

#[test]
fn other_interactive_toggles_interactive() {
    let (set, _) = apply(ReconcileConfig::default(), |b, m| {
        let other = leaf(b, m, "other", NodeValue::Identityref("interactive".into()));
        b.created(other);
    });
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![AuthMethod::Interactive]);
}

// ── Unsupported ──────────────────────────────────────────────────

#[test]
fn unsupported_methods_leave_mask_unchanged() {
    let (set, summary) = apply(ReconcileConfig::default(), |b, m| {
        let pk = leaf(b, m, "publickey", NodeValue::Empty);
        let hb = leaf(b, m, "hostbased", NodeValue::Empty);
        let none = leaf(b, m, "none", NodeValue::Empty);
        let other = leaf(b, m, "other", NodeValue::Identityref("gssapi".into()));
        let unknown = leaf(b, m, "certificate", NodeValue::Empty);
        b.created(pk).created(hb).created(none).created(other).created(unknown);
    });
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![AuthMethod::PublicKey]);
    assert_eq!(summary.unsupported, 4);
    assert_eq!(summary.events, 5);
}

#[test]
fn modified_flag_leaf_is_ignored() {
    let (set, summary) = apply(ReconcileConfig::default(), |b, m| {
        let pk = leaf(b, m, "publickey", NodeValue::Empty);
        b.modified(pk);
    });
    assert!(set.is_empty());
    assert_eq!(summary.ignored, 1);
}

// ── Properties ───────────────────────────────────────────────────

fn leaf_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["publickey", "passsword", "hostbased", "none"])
}

proptest! {
    #[test]
    fn create_then_delete_is_identity(names in prop::collection::vec(leaf_name(), 1..6)) {
        let (set, _) = apply(ReconcileConfig::default(), |b, m| {
            let ids: Vec<NodeId> = names
                .iter()
                .map(|n| leaf(b, m, n, NodeValue::Empty))
                .collect();
            for id in &ids {
                b.created(*id);
            }
            for id in ids.iter().rev() {
                b.deleted(*id);
            }
        });
        prop_assert!(set.is_empty());
    }
}
