//! Creation and teardown of endpoints and call-home clients.

use crate::config::ReconcileConfig;
use crate::error::ReconcileResult;
use crate::reconciler::Outcome;
use crate::runtime::ServerRuntime;
use ncserver_model::{AuthMethodSet, TransportKind};
use ncserver_types::{ChangeOperation, ClientName, EndpointTarget};
use tracing::info;

/// Applies a change of an endpoint's `ssh` container.
///
/// A new endpoint starts with every authentication method disabled, whatever
/// the runtime's own default; the configured methods arrive as separate
/// events.
pub(crate) fn endpoint_event(
    operation: ChangeOperation,
    target: &EndpointTarget,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    match operation {
        ChangeOperation::Created => {
            runtime.add_endpoint(target, TransportKind::Ssh)?;
            runtime.set_auth_methods(target, AuthMethodSet::empty())?;
            info!("Added SSH endpoint {}", target);
            Ok(Outcome::Applied(2))
        }
        ChangeOperation::Deleted => {
            runtime.delete_endpoint(target, TransportKind::Ssh)?;
            info!("Removed SSH endpoint {}", target);
            Ok(Outcome::Applied(1))
        }
        ChangeOperation::Modified | ChangeOperation::Moved => Ok(Outcome::Ignored),
    }
}

/// Applies a change of a `netconf-client` list entry.
pub(crate) fn client_event(
    operation: ChangeOperation,
    client: &ClientName,
    runtime: &mut dyn ServerRuntime,
    config: &ReconcileConfig,
) -> ReconcileResult<Outcome> {
    match operation {
        ChangeOperation::Created => {
            runtime.add_client(client)?;
            if !config.dispatch_call_home {
                info!("Added call-home client {} (dispatch disabled)", client);
                return Ok(Outcome::Applied(1));
            }
            runtime.dispatch_call_home(client)?;
            info!("Added call-home client {} and dispatched connection", client);
            Ok(Outcome::Applied(2))
        }
        ChangeOperation::Deleted => {
            runtime.delete_client(client)?;
            info!("Removed call-home client {}", client);
            Ok(Outcome::Applied(1))
        }
        ChangeOperation::Modified | ChangeOperation::Moved => Ok(Outcome::Ignored),
    }
}
