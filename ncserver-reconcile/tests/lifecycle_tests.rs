mod common;

use common::{init_tracing, ServerTree};
use ncserver_model::{AuthMethod, AuthMethodSet, TransportKind};
use ncserver_reconcile::{
    ErrorCode, MemoryServer, ReconcileConfig, ReconcileError, Reconciler, RuntimeError, Subtree,
};
use ncserver_types::{ClientName, EndpointTarget};

// ── Listen endpoints ─────────────────────────────────────────────

#[test]
fn created_endpoint_starts_with_no_auth_methods() {
    init_tracing();
    let mut t = ServerTree::new();
    let ep = t.listen_endpoint("ep1");
    let mut batch = t.into_batch();
    batch.created(ep.ssh);

    let mut runtime = MemoryServer::new().with_initial_auth_methods(AuthMethodSet::all());
    let summary = Reconciler::default()
        .reconcile(Subtree::ListenSsh, &batch, &mut runtime)
        .unwrap();

    let state = runtime.endpoint(&EndpointTarget::listen("ep1")).unwrap();
    assert_eq!(state.transport, TransportKind::Ssh);
    assert_eq!(state.auth_methods.bits(), 0);
    assert_eq!(summary.mutations, 2);
}

#[test]
fn deleted_endpoint_is_removed() {
    let mut t = ServerTree::new();
    let ep = t.listen_endpoint("ep1");
    let mut batch = t.into_batch();
    batch.created(ep.ssh).deleted(ep.ssh);

    let mut runtime = MemoryServer::new();
    Reconciler::default()
        .reconcile(Subtree::ListenSsh, &batch, &mut runtime)
        .unwrap();
    assert!(runtime.endpoint(&EndpointTarget::listen("ep1")).is_none());
}

#[test]
fn modified_ssh_container_is_ignored() {
    let mut t = ServerTree::new();
    let ep = t.listen_endpoint("ep1");
    let mut batch = t.into_batch();
    batch.modified(ep.ssh);

    let mut runtime = MemoryServer::new();
    let summary = Reconciler::default()
        .reconcile(Subtree::ListenSsh, &batch, &mut runtime)
        .unwrap();
    assert_eq!(summary.ignored, 1);
    assert_eq!(runtime.mutations(), 0);
}

#[test]
fn duplicate_endpoint_is_internal_error() {
    let mut t = ServerTree::new();
    let ep = t.listen_endpoint("ep1");
    let mut batch = t.into_batch();
    batch.created(ep.ssh).created(ep.ssh);

    let mut runtime = MemoryServer::new();
    let err = Reconciler::default()
        .reconcile(Subtree::ListenSsh, &batch, &mut runtime)
        .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Runtime(RuntimeError::DuplicateEndpoint(_))
    ));
    assert_eq!(err.code(), ErrorCode::Internal);
    assert!(runtime.endpoint(&EndpointTarget::listen("ep1")).is_some());
}

#[test]
fn rejected_auth_reset_fails_the_batch() {
    let mut t = ServerTree::new();
    let ep = t.listen_endpoint("ep1");
    let mut batch = t.into_batch();
    batch.created(ep.ssh);

    let mut runtime = MemoryServer::new();
    runtime.reject_operation("set_auth_methods");
    let err = Reconciler::default()
        .reconcile(Subtree::ListenSsh, &batch, &mut runtime)
        .unwrap_err();
    assert!(matches!(err, ReconcileError::Runtime(RuntimeError::Rejected(_))));
}

// ── Call-home clients ────────────────────────────────────────────

#[test]
fn created_client_is_dispatched() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let mut batch = t.into_batch();
    batch.created(client);

    let mut runtime = MemoryServer::new();
    let summary = Reconciler::default()
        .reconcile(Subtree::CallHomeClients, &batch, &mut runtime)
        .unwrap();
    assert!(runtime.client(&ClientName::from("c1")).is_some());
    assert_eq!(runtime.dispatched(), &[ClientName::from("c1")]);
    assert_eq!(summary.mutations, 2);
}

#[test]
fn dispatch_can_be_disabled() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let mut batch = t.into_batch();
    batch.created(client);

    let config = ReconcileConfig {
        dispatch_call_home: false,
        ..ReconcileConfig::default()
    };
    let mut runtime = MemoryServer::new();
    Reconciler::new(config)
        .reconcile(Subtree::CallHomeClients, &batch, &mut runtime)
        .unwrap();
    assert!(runtime.client(&ClientName::from("c1")).is_some());
    assert!(runtime.dispatched().is_empty());
}

#[test]
fn rejected_dispatch_is_reported() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let mut batch = t.into_batch();
    batch.created(client);

    let mut runtime = MemoryServer::new();
    runtime.reject_operation("dispatch_call_home");
    let err = Reconciler::default()
        .reconcile(Subtree::CallHomeClients, &batch, &mut runtime)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);
    // the client itself was added before the dispatch failed
    assert!(runtime.client(&ClientName::from("c1")).is_some());
}

#[test]
fn deleted_client_is_removed() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let mut batch = t.into_batch();
    batch.created(client).deleted(client);

    let mut runtime = MemoryServer::new();
    Reconciler::default()
        .reconcile(Subtree::CallHomeClients, &batch, &mut runtime)
        .unwrap();
    assert!(runtime.client(&ClientName::from("c1")).is_none());
}

// ── Call-home endpoints ──────────────────────────────────────────

#[test]
fn call_home_endpoint_lives_under_its_client() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let ep = t.call_home_endpoint(client, "ep1");
    let mut clients = t.into_batch();
    clients.created(client);
    let mut endpoints = clients.clone();
    endpoints.created(ep.ssh);

    let mut runtime = MemoryServer::new();
    let reconciler = Reconciler::default();
    reconciler
        .reconcile(Subtree::CallHomeClients, &clients, &mut runtime)
        .unwrap();
    reconciler
        .reconcile(Subtree::CallHomeSsh, &endpoints, &mut runtime)
        .unwrap();

    let target = EndpointTarget::call_home("c1", "ep1");
    let state = runtime.endpoint(&target).unwrap();
    assert!(!state.auth_methods.contains(AuthMethod::PublicKey));
    assert!(runtime.endpoint(&EndpointTarget::listen("ep1")).is_none());
}

#[test]
fn call_home_endpoint_without_client_fails() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let ep = t.call_home_endpoint(client, "ep1");
    let mut batch = t.into_batch();
    batch.created(ep.ssh);

    let mut runtime = MemoryServer::new();
    let err = Reconciler::default()
        .reconcile(Subtree::CallHomeSsh, &batch, &mut runtime)
        .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Runtime(RuntimeError::UnknownClient(_))
    ));
    assert_eq!(runtime.mutations(), 0);
}

#[test]
fn failed_calls_are_not_counted_as_mutations() {
    let mut t = ServerTree::new();
    let client = t.client("c1");
    let ep = t.call_home_endpoint(client, "ep1");
    let base = t.into_batch();
    let mut runtime = MemoryServer::new();
    let reconciler = Reconciler::default();

    let mut gone = base.clone();
    gone.deleted(client);
    assert!(reconciler
        .reconcile(Subtree::CallHomeClients, &gone, &mut runtime)
        .is_err());

    let mut orphan = base.clone();
    orphan.deleted(ep.ssh);
    assert!(reconciler
        .reconcile(Subtree::CallHomeSsh, &orphan, &mut runtime)
        .is_err());
    assert_eq!(runtime.mutations(), 0);
}
