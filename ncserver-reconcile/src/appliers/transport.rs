//! TCP parameters, TCP keepalives and SSH authentication limits of an endpoint.

use super::scalar::{read_string, read_u16, read_u8, value_if_set, value_or_default};
use crate::error::ReconcileResult;
use crate::identity::{resolve_endpoint, PathTemplate};
use crate::reconciler::Outcome;
use crate::runtime::ServerRuntime;
use ncserver_model::{
    KeepaliveUpdate, DEFAULT_AUTH_ATTEMPTS, DEFAULT_AUTH_TIMEOUT, DEFAULT_IDLE_TIME,
    DEFAULT_MAX_PROBES, DEFAULT_PROBE_INTERVAL,
};
use ncserver_types::schema::{
    IDLE_TIME, KEEPALIVES, LOCAL_ADDRESS, LOCAL_PORT, MAX_ATTEMPTS, MAX_PROBES, MAX_WAIT,
    PROBE_INTERVAL, REMOTE_ADDRESS, REMOTE_PORT,
};
use ncserver_types::{ChangeEvent, ChangeOperation};
use tracing::debug;

/// A direct child of `tcp-server-parameters` or `tcp-client-parameters`.
///
/// Address and port deletes are not applied: the runtime keeps the last
/// bound value. The `keepalives` presence container switches keepalives on
/// and off; its leaves arrive on the nested stream.
pub(crate) fn tcp_parameter(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let target = resolve_endpoint(event.node, template)?;

    match event.node.schema_name() {
        LOCAL_ADDRESS | REMOTE_ADDRESS => {
            let Some(address) = value_if_set(event, read_string)? else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_address(&target, address)?;
            debug!("Endpoint {} address set to {}", target, address);
        }
        LOCAL_PORT | REMOTE_PORT => {
            let Some(port) = value_if_set(event, read_u16)? else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_port(&target, port)?;
            debug!("Endpoint {} port set to {}", target, port);
        }
        KEEPALIVES => {
            let enabled = match event.operation {
                ChangeOperation::Created => true,
                ChangeOperation::Deleted => false,
                ChangeOperation::Modified | ChangeOperation::Moved => return Ok(Outcome::Ignored),
            };
            runtime.enable_keepalives(&target, enabled)?;
            debug!("Endpoint {} keepalives enabled={}", target, enabled);
        }
        other => {
            debug!("Ignoring TCP parameter {} on endpoint {}", other, target);
            return Ok(Outcome::Ignored);
        }
    }
    Ok(Outcome::Applied(1))
}

/// One leaf of a TCP `keepalives` container. Only the touched field is sent,
/// so the other two keep their last-applied values.
pub(crate) fn keepalive_parameter(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let target = resolve_endpoint(event.node, template)?;
    let mut update = KeepaliveUpdate::default();

    match event.node.schema_name() {
        IDLE_TIME => update.idle_time = value_or_default(event, DEFAULT_IDLE_TIME, read_u16)?,
        MAX_PROBES => update.max_probes = value_or_default(event, DEFAULT_MAX_PROBES, read_u16)?,
        PROBE_INTERVAL => {
            update.probe_interval = value_or_default(event, DEFAULT_PROBE_INTERVAL, read_u16)?;
        }
        _ => return Ok(Outcome::Ignored),
    }
    if update.is_empty() {
        return Ok(Outcome::Ignored);
    }

    runtime.set_keepalives(&target, update)?;
    debug!("Endpoint {} keepalives updated: {:?}", target, update);
    Ok(Outcome::Applied(1))
}

/// `max-wait` and `max-attempts` under the SSH-layer `keepalives` container.
pub(crate) fn auth_limit(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let target = resolve_endpoint(event.node, template)?;

    match event.node.schema_name() {
        MAX_WAIT => {
            let Some(seconds) = value_or_default(event, DEFAULT_AUTH_TIMEOUT, read_u16)? else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_auth_timeout(&target, seconds)?;
            debug!("Endpoint {} auth timeout set to {}", target, seconds);
        }
        MAX_ATTEMPTS => {
            let Some(attempts) = value_or_default(event, DEFAULT_AUTH_ATTEMPTS, read_u8)? else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_auth_attempts(&target, attempts)?;
            debug!("Endpoint {} auth attempts set to {}", target, attempts);
        }
        _ => return Ok(Outcome::Ignored),
    }
    Ok(Outcome::Applied(1))
}
