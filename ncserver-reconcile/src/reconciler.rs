//! The change-stream consumer.

use crate::appliers::{auth_methods, call_home, host_keys, scalar, transport};
use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, ReconcileResult};
use crate::identity::{resolve_client, resolve_endpoint, PathTemplate};
use crate::lifecycle;
use crate::runtime::ServerRuntime;
use crate::subtree::Subtree;
use ncserver_model::DEFAULT_IDLE_TIMEOUT;
use ncserver_types::{ChangeBatch, ChangeEvent, ChangeSource, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// What applying one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event issued this many runtime mutations.
    Applied(usize),
    /// The value is not supported by the runtime; logged and skipped.
    Unsupported,
    /// The event does not map to any mutation.
    Ignored,
}

/// Counters for one reconciled batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub events: usize,
    pub mutations: usize,
    pub unsupported: usize,
    pub ignored: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: Outcome) {
        self.events += 1;
        match outcome {
            Outcome::Applied(n) => self.mutations += n,
            Outcome::Unsupported => self.unsupported += 1,
            Outcome::Ignored => self.ignored += 1,
        }
    }
}

/// One recorded commit: the subtree the store would have invoked and the
/// batch it would have handed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub subtree: Subtree,
    pub batch: ChangeBatch,
}

/// Applies change batches to a runtime.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconciles the pending changes of one subtree.
    ///
    /// Events are applied in stream order. The first fatal error aborts the
    /// batch; mutations issued before it are not rolled back.
    pub fn reconcile(
        &self,
        subtree: Subtree,
        source: &dyn ChangeSource,
        runtime: &mut dyn ServerRuntime,
    ) -> ReconcileResult<BatchSummary> {
        let mut summary = BatchSummary::default();
        match self.run(subtree, source, runtime, &mut summary) {
            Ok(()) => {
                debug!(
                    "Reconciled {}: {} events, {} mutations",
                    subtree, summary.events, summary.mutations
                );
                Ok(summary)
            }
            Err(e) => {
                error!(
                    "Reconciling {} aborted after {} events ({}): {}",
                    subtree,
                    summary.events,
                    e.code(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Reconciles recorded steps in order, stopping at the first failure.
    pub fn replay(
        &self,
        steps: &[ReplayStep],
        runtime: &mut dyn ServerRuntime,
    ) -> ReconcileResult<Vec<BatchSummary>> {
        steps
            .iter()
            .map(|step| self.reconcile(step.subtree, &step.batch, runtime))
            .collect()
    }

    fn run(
        &self,
        subtree: Subtree,
        source: &dyn ChangeSource,
        runtime: &mut dyn ServerRuntime,
        summary: &mut BatchSummary,
    ) -> ReconcileResult<()> {
        let selector = subtree.selector()?;
        for_each_change(source, &selector, summary, |event| {
            self.apply(subtree, event, runtime)
        })?;

        if let (Some(nested), Some(selector)) = (subtree.nested(), subtree.nested_selector()?) {
            for_each_change(source, &selector, summary, |event| {
                apply_nested(nested.template, event, runtime)
            })?;
        }
        Ok(())
    }

    fn apply(
        &self,
        subtree: Subtree,
        event: &ChangeEvent<'_>,
        runtime: &mut dyn ServerRuntime,
    ) -> ReconcileResult<Outcome> {
        match (subtree, subtree.template()) {
            (Subtree::ListenSsh | Subtree::CallHomeSsh, Some(template)) => {
                let target = resolve_endpoint(event.node, template)?;
                lifecycle::endpoint_event(event.operation, &target, runtime)
            }
            (Subtree::CallHomeClients, Some(template)) => {
                let client = resolve_client(event.node, template)?;
                lifecycle::client_event(event.operation, &client, runtime, &self.config)
            }
            (Subtree::ListenTcp | Subtree::CallHomeTcp, Some(template)) => {
                transport::tcp_parameter(event, template, runtime)
            }
            (Subtree::ListenHostKeys | Subtree::CallHomeHostKeys, Some(template)) => {
                host_keys::apply(event, template, runtime)
            }
            (Subtree::ListenAuthMethods | Subtree::CallHomeAuthMethods, Some(template)) => {
                auth_methods::apply(event, template, runtime, &self.config)
            }
            (Subtree::ListenAuthLimits | Subtree::CallHomeAuthLimits, Some(template)) => {
                transport::auth_limit(event, template, runtime)
            }
            (Subtree::CallHomeConnectionType, Some(template)) => {
                call_home::connection_type(event, template, runtime)
            }
            (Subtree::CallHomeReconnect, Some(template)) => {
                call_home::reconnect(event, template, runtime)
            }
            (Subtree::IdleTimeout, _) | (_, None) => idle_timeout(event, runtime),
        }
    }
}

fn apply_nested(
    template: PathTemplate,
    event: &ChangeEvent<'_>,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    match template {
        PathTemplate::CallHomePeriodicParameter => {
            call_home::periodic_parameter(event, template, runtime)
        }
        _ => transport::keepalive_parameter(event, template, runtime),
    }
}

fn idle_timeout(event: &ChangeEvent<'_>, runtime: &mut dyn ServerRuntime) -> ReconcileResult<Outcome> {
    let Some(seconds) = scalar::value_or_default(event, DEFAULT_IDLE_TIMEOUT, scalar::read_u16)?
    else {
        return Ok(Outcome::Ignored);
    };
    runtime.set_idle_timeout(seconds)?;
    debug!("Idle timeout set to {}", seconds);
    Ok(Outcome::Applied(1))
}

/// Drains the stream for `selector`, feeding each event to `apply`.
///
/// Exhaustion ends the loop normally; an iteration error or a failed event
/// stops it with that error.
fn for_each_change(
    source: &dyn ChangeSource,
    selector: &Selector,
    summary: &mut BatchSummary,
    mut apply: impl FnMut(&ChangeEvent<'_>) -> ReconcileResult<Outcome>,
) -> ReconcileResult<()> {
    for event in source.changes(selector)? {
        let event = event.map_err(ReconcileError::Stream)?;
        let outcome = apply(&event)?;
        summary.record(outcome);
    }
    Ok(())
}
