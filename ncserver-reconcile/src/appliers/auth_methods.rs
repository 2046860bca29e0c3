//! Supported SSH authentication methods, one flag per leaf.

use crate::config::ReconcileConfig;
use crate::error::ReconcileResult;
use crate::identity::{resolve_endpoint, PathTemplate};
use crate::reconciler::Outcome;
use crate::runtime::ServerRuntime;
use ncserver_model::AuthMethod;
use ncserver_types::schema::{
    HOSTBASED, INTERACTIVE, NONE, OTHER, PASSSWORD, PASSWORD, PUBLICKEY,
};
use ncserver_types::{ChangeEvent, ChangeOperation, NodeRef};
use tracing::{debug, warn};

enum Leaf {
    Method(AuthMethod),
    Ignored,
    Unsupported,
}

fn classify(node: NodeRef<'_>, config: &ReconcileConfig) -> Leaf {
    match node.schema_name() {
        PUBLICKEY => Leaf::Method(AuthMethod::PublicKey),
        PASSSWORD => Leaf::Method(AuthMethod::Password),
        PASSWORD if config.honor_password_leaf => Leaf::Method(AuthMethod::Password),
        PASSWORD => {
            warn!(
                "SSH authentication \"password\" leaf ignored: only \"passsword\" toggles password \
                 authentication unless honor_password_leaf is set"
            );
            Leaf::Ignored
        }
        HOSTBASED | NONE => {
            warn!("SSH authentication \"{}\" not supported.", node.schema_name());
            Leaf::Unsupported
        }
        OTHER => match node.value().as_str() {
            Some(INTERACTIVE) => Leaf::Method(AuthMethod::Interactive),
            other => {
                warn!("SSH authentication \"{}\" not supported.", other.unwrap_or_default());
                Leaf::Unsupported
            }
        },
        unknown => {
            warn!("SSH authentication leaf \"{}\" not supported.", unknown);
            Leaf::Unsupported
        }
    }
}

pub(crate) fn apply(
    event: &ChangeEvent<'_>,
    template: PathTemplate,
    runtime: &mut dyn ServerRuntime,
    config: &ReconcileConfig,
) -> ReconcileResult<Outcome> {
    let target = resolve_endpoint(event.node, template)?;
    let method = match classify(event.node, config) {
        Leaf::Method(method) => method,
        Leaf::Ignored => return Ok(Outcome::Ignored),
        Leaf::Unsupported => return Ok(Outcome::Unsupported),
    };

    let methods = match event.operation {
        ChangeOperation::Created => {
            runtime.update_auth_methods(&target, &mut |set| set.insert(method))?
        }
        ChangeOperation::Deleted => {
            runtime.update_auth_methods(&target, &mut |set| set.remove(method))?
        }
        ChangeOperation::Modified | ChangeOperation::Moved => return Ok(Outcome::Ignored),
    };

    debug!(
        "Auth method {} {} on endpoint {} (now {:#04x})",
        method,
        event.operation,
        target,
        methods.bits()
    );
    Ok(Outcome::Applied(1))
}
