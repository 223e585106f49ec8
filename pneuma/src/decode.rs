//! Best-effort decoding of an answer into an existing value.

use pneuma_schema::{Describe, SchemaNode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FillError;

/// Decode `raw` over the current contents of `target`.
///
/// Keys present in the answer overwrite the matching fields, nested objects
/// field by field. Keys `schema` does not list are dropped before decoding, and
/// missing keys or `null` values keep the field's prior value. Fields left out
/// of the schema keep their values too. `target` is only written once the
/// merged value decodes completely.
pub(crate) fn decode_into<T>(target: &mut T, raw: &str, schema: &SchemaNode) -> Result<(), FillError>
where
    T: Describe + Serialize + DeserializeOwned,
{
    let mut answer: Value = serde_json::from_str(raw).map_err(FillError::Decode)?;
    prune(&mut answer, schema);
    let mut current = serde_json::to_value(&*target).map_err(FillError::Decode)?;
    prune(&mut current, schema);
    merge(&mut current, answer);

    let mut decoded: T = serde_json::from_value(current).map_err(FillError::Decode)?;
    T::restore_skipped(&mut decoded, target);
    *target = decoded;
    Ok(())
}

// Keep only the keys each record in `schema` declares.
fn prune(value: &mut Value, schema: &SchemaNode) {
    match value {
        Value::Object(map) if schema.is_record() => {
            map.retain(|key, field| match schema.property(key) {
                Some(node) => {
                    prune(field, node);
                    true
                }
                None => false,
            });
        }
        Value::Array(items) => {
            if let Some(node) = schema.items() {
                for item in items {
                    prune(item, node);
                }
            }
        }
        _ => {}
    }
}

fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, patch) => *slot = patch,
    }
}
