//! Walking nested JSON structures.
//!
//! Arrays and objects are containers; everything else (strings included) is
//! an atom. Object keys are never visited, only their values.

use crate::error::{DrillError, Result};
use crate::filter::filter;
use serde_json::Value;

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn children(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map.values().cloned().collect(),
        _ => Vec::new(),
    }
}

/// The non-container elements of `items`, in order.
pub fn atoms(items: &[Value]) -> Vec<Value> {
    filter(items, |v| !is_container(v))
}

/// Pairs every atom reachable from `root` with its depth, starting at `depth`.
///
/// Within one container the atoms come first, then each nested container is
/// walked at `depth + 1`. A bare atom yields itself at `depth`.
pub fn walk(root: &Value, depth: usize) -> Result<Vec<(Value, usize)>> {
    if depth < 1 {
        return Err(DrillError::Validation("depth must be at least 1".into()));
    }
    let mut out = Vec::new();
    walk_into(root, depth, &mut out);
    Ok(out)
}

fn walk_into(node: &Value, depth: usize, out: &mut Vec<(Value, usize)>) {
    if !is_container(node) {
        out.push((node.clone(), depth));
        return;
    }
    let items = children(node);
    out.extend(atoms(&items).into_iter().map(|a| (a, depth)));
    for nested in items.iter().filter(|v| is_container(v)) {
        walk_into(nested, depth + 1, out);
    }
}
