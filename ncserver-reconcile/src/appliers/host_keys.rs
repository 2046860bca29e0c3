//! Host-key list entries: kept in configuration order on the runtime.

use crate::error::{ReconcileError, ReconcileResult};
use crate::identity::{resolve_endpoint, PathTemplate};
use crate::reconciler::Outcome;
use crate::runtime::ServerRuntime;
use ncserver_types::schema::NAME;
use ncserver_types::{ChangeEvent, ChangeOperation, NodeRef};
use tracing::debug;

pub(crate) fn apply(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
) -> ReconcileResult<Outcome> {
    let target = resolve_endpoint(event.node, template)?;
    let name = host_key_name(event.node)?;

    match event.operation {
        ChangeOperation::Created => runtime.add_host_key(&target, name)?,
        ChangeOperation::Deleted => runtime.delete_host_key(&target, name)?,
        ChangeOperation::Moved => runtime.move_host_key(&target, name, event.list_anchor())?,
        ChangeOperation::Modified => {
            return Err(ReconcileError::UnexpectedOperation {
                path: event.node.schema_path(),
                operation: event.operation,
            });
        }
    }

    debug!("Host key {} {} on endpoint {}", name, event.operation, target);
    Ok(Outcome::Applied(1))
}

fn host_key_name<'a>(entry: NodeRef<'a>) -> ReconcileResult<&'a str> {
    entry
        .first_child()
        .filter(|key| key.schema_name() == NAME)
        .and_then(|key| key.value().as_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ReconcileError::MissingKey {
            path: entry.schema_path(),
        })
}
