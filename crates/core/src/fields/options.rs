//! Membership editing for multi-valued fields
//!
//! An update never blind-writes a multi-valued field: the current membership
//! is read off the issue into a working [`OptionSet`], amended exactly once,
//! and re-encoded for submission. The working set lives for a single update
//! call and is never persisted.

use indexmap::IndexSet;
use serde_json::Value;

use super::coder::FieldCategory;
use super::descriptor::FieldDescriptor;
use super::error::FieldError;

/// The locally reconstructed membership of a multi-valued field.
///
/// Insertion-ordered so re-encoding preserves the remote's current order,
/// with the amended value appended at the end.
pub type OptionSet = IndexSet<String>;

/// One atomic membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOp {
    Add,
    Remove,
}

impl OptionOp {
    /// Parse an option directive; anything besides add/remove is rejected.
    pub fn parse(op: &str) -> Result<Self, FieldError> {
        match op.trim().to_lowercase().as_str() {
            "add" => Ok(OptionOp::Add),
            "remove" => Ok(OptionOp::Remove),
            other => Err(FieldError::InvalidOperation(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionOp::Add => "add",
            OptionOp::Remove => "remove",
        }
    }
}

fn member_string(element: &Value) -> Option<String> {
    if let Some(s) = element.as_str() {
        return Some(s.to_string());
    }
    ["value", "name", "accountId"]
        .iter()
        .find_map(|key| element.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Read the current membership of a field off a fetched issue document.
///
/// Accepts a list or a single object; per element, whichever of
/// `value`/`name`/`accountId` is present becomes the member string (raw
/// strings pass through). A missing or null field yields an empty set.
///
/// Cascading selections have no list-membership semantics and are rejected;
/// callers must use the full-value update path for those fields.
pub fn extract_options(issue: &Value, descriptor: &FieldDescriptor) -> Result<OptionSet, FieldError> {
    if FieldCategory::of(descriptor) == FieldCategory::Cascading {
        return Err(FieldError::UnsupportedField(descriptor.name.clone()));
    }

    let raw = &issue["fields"][&descriptor.id];

    let mut members = OptionSet::new();
    match raw {
        Value::Null => {}
        Value::Array(elements) => {
            for element in elements {
                if let Some(member) = member_string(element) {
                    members.insert(member);
                }
            }
        }
        single => {
            if let Some(member) = member_string(single) {
                members.insert(member);
            }
        }
    }

    Ok(members)
}

/// Apply one add/remove against a working set, returning the new set.
///
/// Adding a present value and removing an absent one are both input errors:
/// the caller asked for a change that would not change anything, which
/// usually means they are looking at stale state.
pub fn amend(mut set: OptionSet, op: OptionOp, value: &str) -> Result<OptionSet, FieldError> {
    match op {
        OptionOp::Add => {
            if !set.insert(value.to_string()) {
                return Err(FieldError::DuplicateValue(value.to_string()));
            }
        }
        OptionOp::Remove => {
            if !set.shift_remove(value) {
                return Err(FieldError::ValueNotFound(value.to_string()));
            }
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::descriptor::{JiraFieldBean, JiraFieldSchema};

    fn descriptor(id: &str, custom_type: Option<&str>) -> FieldDescriptor {
        FieldDescriptor::from_bean(JiraFieldBean {
            id: id.to_string(),
            name: "Test Field".to_string(),
            key: Some(id.to_string()),
            custom: Some(custom_type.is_some()),
            searchable: Some(true),
            schema: custom_type.map(|ct| JiraFieldSchema {
                raw_type: "array".to_string(),
                custom: Some(ct.to_string()),
            }),
        })
    }

    fn issue_with(id: &str, value: Value) -> Value {
        serde_json::json!({ "key": "PROJ-1", "fields": { id: value } })
    }

    fn set_of(members: &[&str]) -> OptionSet {
        members.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_extract_from_object_list() {
        let issue = issue_with(
            "components",
            serde_json::json!([{"name": "Backend"}, {"name": "API"}]),
        );

        let members = extract_options(&issue, &descriptor("components", None)).unwrap();

        assert_eq!(members, set_of(&["Backend", "API"]));
    }

    #[test]
    fn test_extract_preserves_remote_order() {
        let issue = issue_with(
            "customfield_10100",
            serde_json::json!([{"value": "z"}, {"value": "a"}, {"value": "m"}]),
        );
        let descriptor = descriptor(
            "customfield_10100",
            Some("com.atlassian.jira.plugin.system.customfieldtypes:multiselect"),
        );

        let members = extract_options(&issue, &descriptor).unwrap();

        assert_eq!(
            members.iter().cloned().collect::<Vec<_>>(),
            vec!["z", "a", "m"]
        );
    }

    #[test]
    fn test_extract_from_raw_string_list() {
        let issue = issue_with("labels", serde_json::json!(["backend", "api"]));

        let members = extract_options(&issue, &descriptor("labels", None)).unwrap();

        assert_eq!(members, set_of(&["backend", "api"]));
    }

    #[test]
    fn test_extract_from_single_object() {
        let issue = issue_with("assignee", serde_json::json!({"accountId": "acc-1"}));

        let members = extract_options(&issue, &descriptor("assignee", None)).unwrap();

        assert_eq!(members, set_of(&["acc-1"]));
    }

    #[test]
    fn test_extract_missing_field_is_empty() {
        let issue = serde_json::json!({ "key": "PROJ-1", "fields": {} });

        let members = extract_options(&issue, &descriptor("components", None)).unwrap();

        assert!(members.is_empty());
    }

    #[test]
    fn test_extract_rejects_cascading() {
        let issue = issue_with("customfield_10061", serde_json::json!({"value": "Red"}));
        let descriptor = descriptor(
            "customfield_10061",
            Some("com.atlassian.jira.plugin.system.customfieldtypes:cascadingselect"),
        );

        let err = extract_options(&issue, &descriptor).unwrap_err();

        assert_eq!(err, FieldError::UnsupportedField("Test Field".to_string()));
    }

    #[test]
    fn test_amend_add_appends() {
        let set = amend(set_of(&["Backend"]), OptionOp::Add, "QA").unwrap();

        assert_eq!(set, set_of(&["Backend", "QA"]));
    }

    #[test]
    fn test_amend_add_twice_fails() {
        let set = amend(set_of(&["Backend"]), OptionOp::Add, "QA").unwrap();

        let err = amend(set, OptionOp::Add, "QA").unwrap_err();

        assert_eq!(err, FieldError::DuplicateValue("QA".to_string()));
    }

    #[test]
    fn test_amend_remove_keeps_other_members() {
        let set = amend(set_of(&["a", "b", "c"]), OptionOp::Remove, "b").unwrap();

        assert_eq!(set, set_of(&["a", "c"]));
    }

    #[test]
    fn test_amend_remove_absent_fails() {
        let err = amend(set_of(&["a"]), OptionOp::Remove, "z").unwrap_err();

        assert_eq!(err, FieldError::ValueNotFound("z".to_string()));
    }

    #[test]
    fn test_op_parse() {
        assert_eq!(OptionOp::parse("add").unwrap(), OptionOp::Add);
        assert_eq!(OptionOp::parse(" Remove ").unwrap(), OptionOp::Remove);

        let err = OptionOp::parse("append").unwrap_err();
        assert_eq!(err, FieldError::InvalidOperation("append".to_string()));
    }
}
