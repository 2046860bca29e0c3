//! Scalar leaves with documented defaults.
//!
//! `Created` and `Modified` carry the new value; `Deleted` restores the
//! field's default. A `Moved` scalar is meaningless and is skipped.

use crate::error::{ReconcileError, ReconcileResult};
use ncserver_types::{datetime_to_epoch, ChangeEvent, ChangeOperation, NodeRef};

/// The value to store for `event`, or None if the event changes nothing.
pub(crate) fn value_or_default<'a, T>(
    event: &ChangeEvent<'a>,
    default: T,
    read: impl FnOnce(NodeRef<'a>) -> ReconcileResult<T>,
) -> ReconcileResult<Option<T>> {
    match event.operation {
        ChangeOperation::Created | ChangeOperation::Modified => read(event.node).map(Some),
        ChangeOperation::Deleted => Ok(Some(default)),
        ChangeOperation::Moved => Ok(None),
    }
}

/// Like [`value_or_default`] for fields without a default: deletes are skipped.
pub(crate) fn value_if_set<'a, T>(
    event: &ChangeEvent<'a>,
    read: impl FnOnce(NodeRef<'a>) -> ReconcileResult<T>,
) -> ReconcileResult<Option<T>> {
    match event.operation {
        ChangeOperation::Created | ChangeOperation::Modified => read(event.node).map(Some),
        ChangeOperation::Deleted | ChangeOperation::Moved => Ok(None),
    }
}

pub(crate) fn read_u16(node: NodeRef<'_>) -> ReconcileResult<u16> {
    node.value().as_u16().ok_or_else(|| mismatch(node, "uint16"))
}

pub(crate) fn read_u8(node: NodeRef<'_>) -> ReconcileResult<u8> {
    node.value().as_u8().ok_or_else(|| mismatch(node, "uint8"))
}

pub(crate) fn read_string(node: NodeRef<'_>) -> ReconcileResult<&str> {
    node.value().as_str().ok_or_else(|| mismatch(node, "string"))
}

/// Reads a `date-and-time` leaf as seconds since the Unix epoch.
pub(crate) fn read_datetime(node: NodeRef<'_>) -> ReconcileResult<i64> {
    let raw = node.value().as_str().ok_or_else(|| mismatch(node, "date-and-time"))?;
    datetime_to_epoch(raw).map_err(|e| ReconcileError::InvalidValue {
        path: node.schema_path(),
        reason: e.to_string(),
    })
}

fn mismatch(node: NodeRef<'_>, expected: &str) -> ReconcileError {
    ReconcileError::InvalidValue {
        path: node.schema_path(),
        reason: format!("expected {expected}, found {}", node.value().type_name()),
    }
}
