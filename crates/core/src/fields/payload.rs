//! Submission bodies for the issue edit endpoint
//!
//! Two body families exist on the wire: a `fields` body replaces a field's
//! entire value, while an `update` body carries operations against the
//! field's current content. The planning functions below compose the coder
//! and the option editor into complete request bodies, so the shell only
//! fetches documents and submits what it is handed.

use serde_json::{json, Value};

use super::coder::{self, FieldCategory, FieldValue};
use super::descriptor::FieldDescriptor;
use super::error::FieldError;
use super::options::{self, OptionOp, OptionSet};

/// Full-replace body: `{"fields": {<field id>: <encoded>}}`.
pub fn fields_body(field_id: &str, encoded: Value) -> Value {
    json!({ "fields": { field_id: encoded } })
}

/// Update body carrying the field's complete next membership as a single
/// `set` operation: `{"update": {<field id>: [{"set": <members>}]}}`.
pub fn update_body(field_id: &str, members: Value) -> Value {
    json!({ "update": { field_id: [ { "set": members } ] } })
}

/// The empty wire value for a category: an empty list for collection shapes,
/// null for everything else.
pub fn clear_value(category: FieldCategory) -> Value {
    if category.is_collection() {
        json!([])
    } else {
        Value::Null
    }
}

/// Re-encode a working membership set into the category's collection shape.
pub fn encode_members(category: FieldCategory, members: &OptionSet) -> Value {
    match category.member_key() {
        Some(key) => Value::Array(members.iter().map(|m| json!({ key: m })).collect()),
        None => json!(members.iter().collect::<Vec<_>>()),
    }
}

/// Plan a full replace: encode the input for the resolved field and wrap it
/// in a `fields` body. Shape and arity errors surface before any request.
pub fn plan_replace(descriptor: &FieldDescriptor, value: &FieldValue) -> Result<Value, FieldError> {
    let category = FieldCategory::of(descriptor);
    let encoded = coder::encode_full(category, &descriptor.name, value)?;
    Ok(fields_body(&descriptor.id, encoded))
}

/// Plan a clear: the category's empty value in a `fields` body.
pub fn plan_clear(descriptor: &FieldDescriptor) -> Value {
    let category = FieldCategory::of(descriptor);
    fields_body(&descriptor.id, clear_value(category))
}

/// Plan one add/remove against a fetched issue: read the current membership,
/// amend it, and wrap the re-encoded result in an `update` body.
pub fn plan_option_edit(
    issue: &Value,
    descriptor: &FieldDescriptor,
    op: OptionOp,
    value: &str,
) -> Result<Value, FieldError> {
    let members = options::extract_options(issue, descriptor)?;
    let members = options::amend(members, op, value)?;

    let category = FieldCategory::of(descriptor);
    Ok(update_body(&descriptor.id, encode_members(category, &members)))
}
