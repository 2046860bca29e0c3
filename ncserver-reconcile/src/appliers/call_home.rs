//! Per-client call-home settings: connection type, periodic parameters and
//! reconnect strategy.

use super::scalar::{read_datetime, read_string, read_u16, read_u8, value_or_default};
use crate::error::ReconcileResult;
use crate::identity::{resolve_client, PathTemplate};
use crate::reconciler::Outcome;
use crate::runtime::ServerRuntime;
use ncserver_model::{
    ConnectionType, StartWith, DEFAULT_ANCHOR_TIME, DEFAULT_PERIOD, DEFAULT_PERIODIC_IDLE_TIMEOUT,
    DEFAULT_RECONNECT_MAX_ATTEMPTS,
};
use ncserver_types::schema::{
    ANCHOR_TIME, IDLE_TIMEOUT, MAX_ATTEMPTS, PERIOD, PERIODIC, PERSISTENT, START_WITH,
};
use ncserver_types::{ChangeEvent, ChangeOperation};
use tracing::{debug, warn};

/// The `persistent`/`periodic` choice. Only creation switches the type;
/// deleting one case always comes with creating the other.
pub(crate) fn connection_type(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let client = resolve_client(event.node, template)?;
    if event.operation != ChangeOperation::Created {
        return Ok(Outcome::Ignored);
    }

    let kind = match event.node.schema_name() {
        PERSISTENT => ConnectionType::Persistent,
        PERIODIC => ConnectionType::Periodic,
        _ => return Ok(Outcome::Ignored),
    };
    runtime.set_connection_type(&client, kind)?;
    debug!("Call-home client {} connection type {:?}", client, kind);
    Ok(Outcome::Applied(1))
}

/// One leaf of the `periodic` container.
pub(crate) fn periodic_parameter(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let client = resolve_client(event.node, template)?;

    match event.node.schema_name() {
        PERIOD => {
            let Some(minutes) = value_or_default(event, DEFAULT_PERIOD, read_u16)? else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_periodic_period(&client, minutes)?;
            debug!("Call-home client {} period set to {}", client, minutes);
        }
        ANCHOR_TIME => {
            let Some(epoch) = value_or_default(event, DEFAULT_ANCHOR_TIME, read_datetime)? else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_periodic_anchor_time(&client, epoch)?;
            debug!("Call-home client {} anchor time set to {}", client, epoch);
        }
        IDLE_TIMEOUT => {
            let Some(seconds) =
                value_or_default(event, DEFAULT_PERIODIC_IDLE_TIMEOUT, read_u16)?
            else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_periodic_idle_timeout(&client, seconds)?;
            debug!("Call-home client {} periodic idle timeout set to {}", client, seconds);
        }
        _ => return Ok(Outcome::Ignored),
    }
    Ok(Outcome::Applied(1))
}

/// One leaf of the `reconnect-strategy` container.
pub(crate) fn reconnect(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let client = resolve_client(event.node, template)?;

    match event.node.schema_name() {
        START_WITH => {
            let Some(raw) = value_or_default(event, StartWith::default().as_str(), read_string)?
            else {
                return Ok(Outcome::Ignored);
            };
            let Ok(start_with) = raw.parse::<StartWith>() else {
                warn!("Call-home start-with \"{}\" not supported.", raw);
                return Ok(Outcome::Unsupported);
            };
            runtime.set_start_with(&client, start_with)?;
            debug!("Call-home client {} starts with {}", client, start_with);
        }
        MAX_ATTEMPTS => {
            let Some(attempts) =
                value_or_default(event, DEFAULT_RECONNECT_MAX_ATTEMPTS, read_u8)?
            else {
                return Ok(Outcome::Ignored);
            };
            runtime.set_reconnect_max_attempts(&client, attempts)?;
            debug!("Call-home client {} reconnect attempts set to {}", client, attempts);
        }
        _ => return Ok(Outcome::Ignored),
    }
    Ok(Outcome::Applied(1))
}
