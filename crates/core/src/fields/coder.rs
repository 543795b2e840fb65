//! Per-category value encoding and decoding
//!
//! Each field type follows one of a closed set of wire policies. The policy
//! is a [`FieldCategory`] variant carrying both directions: `encode_full`
//! translates user input into the shape the edit endpoint requires, and
//! `decode_current` reads a field's current value back out of an issue
//! document.

use serde::Serialize;
use serde_json::{json, Value};

use super::cascading;
use super::descriptor::{FieldDescriptor, FieldSchema};
use super::error::FieldError;

// ============================================================================
// Input Model
// ============================================================================

/// Heterogeneous user input for a field write.
///
/// CLI callers hand over a single string; library callers may pass an
/// explicit list. Collection-valued categories accept either (a string is
/// comma-split); scalar categories reject lists before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// The input shape name used in type-mismatch messages.
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::List(_) => "list",
        }
    }

    /// Individual values: comma-split for text, as-is for lists.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            FieldValue::List(items) => items.clone(),
        }
    }

    fn as_text(&self, field: &str, expected: &'static str) -> Result<&str, FieldError> {
        match self {
            FieldValue::Text(s) => Ok(s.trim()),
            FieldValue::List(_) => Err(FieldError::TypeMismatch {
                field: field.to_string(),
                expected,
                actual: self.shape(),
            }),
        }
    }
}

// ============================================================================
// Field Categories
// ============================================================================

/// Closed set of field-type policies.
///
/// Replaces shape-sniffing over the remote schema with an exhaustive variant
/// per wire behavior; every branch below is testable on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    /// Single choice: select, radio buttons, epic status: `{"value": v}`
    Select,
    /// Two-level choice encoded from the textual cascading grammar
    Cascading,
    /// Multi select / checkboxes: `[{"value": v}, …]`
    MultiOption,
    /// Labels: raw string list on full replace
    Labels,
    /// Single-version picker: `[{"name": v}]`, one value per full replace
    Version,
    /// Name-keyed collections: components, fix/affects versions,
    /// multi-version and multi-group pickers: `[{"name": v}, …]`
    NamedList,
    /// Name-keyed scalar: priority, group picker: `{"name": v}`
    NameRef,
    /// Single user picker: `{"accountId": v}`
    UserPicker,
    /// Multi user picker: `[{"accountId": v}, …]`
    MultiUser,
    /// Assignee / reporter: `{"accountId": v}`
    AccountRef,
    /// Key-keyed scalar: parent, project: `{"key": v}`
    KeyRef,
    /// Time tracking: `{"originalEstimate": v}`
    TimeTracking,
    /// Number fields: raw number
    Numeric,
    /// Everything else: raw value passthrough
    Scalar,
}

impl FieldCategory {
    /// Pick the policy for a resolved field.
    pub fn of(descriptor: &FieldDescriptor) -> Self {
        match &descriptor.schema {
            FieldSchema::Custom {
                custom_type,
                raw_type,
            } => {
                let kind = custom_type.rsplit(':').next().unwrap_or(custom_type);
                match kind {
                    "select" | "radiobuttons" | "gh-epic-status" => FieldCategory::Select,
                    "cascadingselect" => FieldCategory::Cascading,
                    "multiselect" | "multicheckboxes" => FieldCategory::MultiOption,
                    "labels" => FieldCategory::Labels,
                    "version" => FieldCategory::Version,
                    "multiversion" | "multigrouppicker" => FieldCategory::NamedList,
                    "grouppicker" => FieldCategory::NameRef,
                    "userpicker" => FieldCategory::UserPicker,
                    "multiuserpicker" => FieldCategory::MultiUser,
                    "project" => FieldCategory::KeyRef,
                    "float" => FieldCategory::Numeric,
                    _ if raw_type == "number" => FieldCategory::Numeric,
                    _ => FieldCategory::Scalar,
                }
            }
            FieldSchema::System { key } => match key.as_str() {
                "assignee" | "reporter" => FieldCategory::AccountRef,
                "components" | "fixVersions" | "versions" => FieldCategory::NamedList,
                "labels" => FieldCategory::Labels,
                "priority" => FieldCategory::NameRef,
                "parent" | "project" => FieldCategory::KeyRef,
                "timetracking" => FieldCategory::TimeTracking,
                _ => FieldCategory::Scalar,
            },
        }
    }

    /// Whether the wire shape is a list of members.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            FieldCategory::MultiOption
                | FieldCategory::Labels
                | FieldCategory::Version
                | FieldCategory::NamedList
                | FieldCategory::MultiUser
        )
    }

    /// JSON key wrapping one member of this category's collection shape.
    /// Labels carry raw strings, signalled by `None`.
    pub fn member_key(&self) -> Option<&'static str> {
        match self {
            FieldCategory::Labels => None,
            FieldCategory::Version | FieldCategory::NamedList | FieldCategory::NameRef => {
                Some("name")
            }
            FieldCategory::MultiUser | FieldCategory::UserPicker | FieldCategory::AccountRef => {
                Some("accountId")
            }
            FieldCategory::KeyRef => Some("key"),
            _ => Some("value"),
        }
    }
}

// ============================================================================
// Encoding (write direction)
// ============================================================================

/// Normalize a comma-separated string into one single-key object per token.
///
/// This is the canonical normalization used by every collection-valued
/// encoder: `multi_field("a,b", "name")` yields `[{"name":"a"},{"name":"b"}]`
/// and a single token yields a one-element list. Order is preserved.
pub fn multi_field(data: &str, key: &str) -> Vec<Value> {
    data.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| json!({ key: t }))
        .collect()
}

/// Encode an input value into the full-replace wire shape for one category.
///
/// Arity rules are enforced here: labels and single-version fields take
/// exactly one value on full replace, pointing multi-value edits at the
/// add/remove path instead. All shape checks fire before any network call.
pub fn encode_full(
    category: FieldCategory,
    field: &str,
    value: &FieldValue,
) -> Result<Value, FieldError> {
    match category {
        FieldCategory::Select => {
            let text = value.as_text(field, "a single choice")?;
            Ok(json!({ "value": text }))
        }
        FieldCategory::Cascading => {
            let text = value.as_text(field, "a cascading value string")?;
            let choice = cascading::parse(text)?;
            Ok(cascading::encode(&choice))
        }
        FieldCategory::MultiOption
        | FieldCategory::Labels
        | FieldCategory::Version
        | FieldCategory::NamedList
        | FieldCategory::MultiUser => {
            let members: Vec<Value> = match (value, category.member_key()) {
                (FieldValue::Text(data), Some(key)) => multi_field(data, key),
                (FieldValue::Text(data), None) => data
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(|t| json!(t))
                    .collect(),
                (FieldValue::List(items), Some(key)) => {
                    items.iter().map(|t| json!({ key: t })).collect()
                }
                (FieldValue::List(items), None) => items.iter().map(|t| json!(t)).collect(),
            };

            let single_value_only =
                matches!(category, FieldCategory::Labels | FieldCategory::Version);
            if single_value_only && members.len() > 1 {
                return Err(FieldError::Arity {
                    field: field.to_string(),
                    count: members.len(),
                });
            }

            Ok(Value::Array(members))
        }
        FieldCategory::NameRef => {
            let text = value.as_text(field, "a name")?;
            Ok(json!({ "name": text }))
        }
        FieldCategory::UserPicker | FieldCategory::AccountRef => {
            let text = value.as_text(field, "an account id")?;
            Ok(json!({ "accountId": text }))
        }
        FieldCategory::KeyRef => {
            let text = value.as_text(field, "a key")?;
            Ok(json!({ "key": text }))
        }
        FieldCategory::TimeTracking => {
            let text = value.as_text(field, "an estimate string")?;
            Ok(json!({ "originalEstimate": text }))
        }
        FieldCategory::Numeric => {
            let text = value.as_text(field, "a number")?;
            let number: f64 = text.parse().map_err(|_| FieldError::TypeMismatch {
                field: field.to_string(),
                expected: "a number",
                actual: "string",
            })?;
            Ok(json!(number))
        }
        FieldCategory::Scalar => {
            let text = value.as_text(field, "a string")?;
            Ok(json!(text))
        }
    }
}

// ============================================================================
// Decoding (read direction)
// ============================================================================

fn member_string(element: &Value, key: Option<&str>) -> Option<String> {
    if let Some(s) = element.as_str() {
        return Some(s.to_string());
    }
    // Preferred key first, then the remaining single-key shapes.
    let keys = key.into_iter().chain(["value", "name", "accountId"]);
    for k in keys {
        if let Some(s) = element.get(k).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    None
}

/// Decode a field's current raw value into the matching input shape.
///
/// The inverse of [`encode_full`] for every category that has a read
/// direction; cascading values have no textual read-back and decode to
/// `None`, as do absent/null values.
pub fn decode_current(category: FieldCategory, raw: &Value) -> Option<FieldValue> {
    if raw.is_null() {
        return None;
    }

    match category {
        FieldCategory::Cascading => None,
        FieldCategory::Select
        | FieldCategory::NameRef
        | FieldCategory::UserPicker
        | FieldCategory::AccountRef
        | FieldCategory::KeyRef => member_string(raw, category.member_key()).map(FieldValue::Text),
        FieldCategory::TimeTracking => raw
            .get("originalEstimate")
            .and_then(Value::as_str)
            .map(|s| FieldValue::Text(s.to_string())),
        FieldCategory::MultiOption
        | FieldCategory::Labels
        | FieldCategory::Version
        | FieldCategory::NamedList
        | FieldCategory::MultiUser => {
            let elements = raw.as_array()?;
            let members = elements
                .iter()
                .filter_map(|el| member_string(el, category.member_key()))
                .collect();
            Some(FieldValue::List(members))
        }
        FieldCategory::Numeric | FieldCategory::Scalar => match raw {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            other => Some(FieldValue::Text(other.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::descriptor::{JiraFieldBean, JiraFieldSchema};

    fn custom_descriptor(custom_type: &str, raw_type: &str) -> FieldDescriptor {
        FieldDescriptor::from_bean(JiraFieldBean {
            id: "customfield_10100".to_string(),
            name: "Test Field".to_string(),
            key: Some("customfield_10100".to_string()),
            custom: Some(true),
            searchable: Some(true),
            schema: Some(JiraFieldSchema {
                raw_type: raw_type.to_string(),
                custom: Some(custom_type.to_string()),
            }),
        })
    }

    fn system_descriptor(key: &str) -> FieldDescriptor {
        FieldDescriptor::from_bean(JiraFieldBean {
            id: key.to_string(),
            name: key.to_string(),
            key: Some(key.to_string()),
            custom: Some(false),
            searchable: Some(true),
            schema: None,
        })
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_multi_field_single_token() {
        assert_eq!(
            multi_field("a", "value"),
            vec![serde_json::json!({"value": "a"})]
        );
    }

    #[test]
    fn test_multi_field_preserves_order() {
        assert_eq!(
            multi_field("a,b,c", "name"),
            vec![
                serde_json::json!({"name": "a"}),
                serde_json::json!({"name": "b"}),
                serde_json::json!({"name": "c"}),
            ]
        );
    }

    #[test]
    fn test_multi_field_trims_and_skips_empty_tokens() {
        assert_eq!(
            multi_field(" a , ,b ", "value"),
            vec![
                serde_json::json!({"value": "a"}),
                serde_json::json!({"value": "b"}),
            ]
        );
    }

    #[test]
    fn test_category_of_custom_types() {
        let cases = [
            ("com.atlassian.jira.plugin.system.customfieldtypes:select", FieldCategory::Select),
            ("com.atlassian.jira.plugin.system.customfieldtypes:radiobuttons", FieldCategory::Select),
            ("com.atlassian.jira.plugin.system.customfieldtypes:cascadingselect", FieldCategory::Cascading),
            ("com.atlassian.jira.plugin.system.customfieldtypes:multiselect", FieldCategory::MultiOption),
            ("com.atlassian.jira.plugin.system.customfieldtypes:multicheckboxes", FieldCategory::MultiOption),
            ("com.atlassian.jira.plugin.system.customfieldtypes:labels", FieldCategory::Labels),
            ("com.atlassian.jira.plugin.system.customfieldtypes:version", FieldCategory::Version),
            ("com.atlassian.jira.plugin.system.customfieldtypes:multiversion", FieldCategory::NamedList),
            ("com.atlassian.jira.plugin.system.customfieldtypes:userpicker", FieldCategory::UserPicker),
            ("com.atlassian.jira.plugin.system.customfieldtypes:multiuserpicker", FieldCategory::MultiUser),
            ("com.atlassian.jira.plugin.system.customfieldtypes:float", FieldCategory::Numeric),
            ("com.atlassian.jira.plugin.system.customfieldtypes:textfield", FieldCategory::Scalar),
            ("com.pyxis.greenhopper.jira:gh-epic-status", FieldCategory::Select),
            ("com.pyxis.greenhopper.jira:gh-sprint", FieldCategory::Scalar),
        ];

        for (custom_type, expected) in cases {
            let descriptor = custom_descriptor(custom_type, "any");
            assert_eq!(
                FieldCategory::of(&descriptor),
                expected,
                "wrong category for {custom_type}"
            );
        }
    }

    #[test]
    fn test_category_of_system_keys() {
        let cases = [
            ("assignee", FieldCategory::AccountRef),
            ("reporter", FieldCategory::AccountRef),
            ("components", FieldCategory::NamedList),
            ("fixVersions", FieldCategory::NamedList),
            ("labels", FieldCategory::Labels),
            ("priority", FieldCategory::NameRef),
            ("parent", FieldCategory::KeyRef),
            ("timetracking", FieldCategory::TimeTracking),
            ("description", FieldCategory::Scalar),
        ];

        for (key, expected) in cases {
            let descriptor = system_descriptor(key);
            assert_eq!(
                FieldCategory::of(&descriptor),
                expected,
                "wrong category for {key}"
            );
        }
    }

    #[test]
    fn test_category_numeric_from_raw_type() {
        let descriptor = custom_descriptor("vendor.example:story-points", "number");
        assert_eq!(FieldCategory::of(&descriptor), FieldCategory::Numeric);
    }

    #[test]
    fn test_encode_select_round_trip() {
        let encoded = encode_full(FieldCategory::Select, "Severity", &text("High")).unwrap();
        assert_eq!(encoded, serde_json::json!({"value": "High"}));

        let decoded = decode_current(FieldCategory::Select, &encoded).unwrap();
        assert_eq!(decoded, text("High"));
    }

    #[test]
    fn test_encode_multi_option_round_trip() {
        let encoded = encode_full(FieldCategory::MultiOption, "Teams", &text("x")).unwrap();
        assert_eq!(encoded, serde_json::json!([{"value": "x"}]));

        let decoded = decode_current(FieldCategory::MultiOption, &encoded).unwrap();
        assert_eq!(decoded, FieldValue::List(vec!["x".to_string()]));
    }

    #[test]
    fn test_encode_labels_round_trip() {
        let encoded = encode_full(FieldCategory::Labels, "Labels", &text("backend")).unwrap();
        assert_eq!(encoded, serde_json::json!(["backend"]));

        let decoded = decode_current(FieldCategory::Labels, &encoded).unwrap();
        assert_eq!(decoded, FieldValue::List(vec!["backend".to_string()]));
    }

    #[test]
    fn test_encode_version_round_trip() {
        let encoded = encode_full(FieldCategory::Version, "Found in", &text("1.2.0")).unwrap();
        assert_eq!(encoded, serde_json::json!([{"name": "1.2.0"}]));

        let decoded = decode_current(FieldCategory::Version, &encoded).unwrap();
        assert_eq!(decoded, FieldValue::List(vec!["1.2.0".to_string()]));
    }

    #[test]
    fn test_encode_named_list_round_trip() {
        let encoded =
            encode_full(FieldCategory::NamedList, "Components", &text("Backend,API")).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!([{"name": "Backend"}, {"name": "API"}])
        );

        let decoded = decode_current(FieldCategory::NamedList, &encoded).unwrap();
        assert_eq!(
            decoded,
            FieldValue::List(vec!["Backend".to_string(), "API".to_string()])
        );
    }

    #[test]
    fn test_encode_user_pickers_round_trip() {
        let encoded = encode_full(FieldCategory::UserPicker, "Owner", &text("5b10ac8d")).unwrap();
        assert_eq!(encoded, serde_json::json!({"accountId": "5b10ac8d"}));
        assert_eq!(
            decode_current(FieldCategory::UserPicker, &encoded).unwrap(),
            text("5b10ac8d")
        );

        let encoded =
            encode_full(FieldCategory::MultiUser, "Approvers", &text("a1,b2")).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!([{"accountId": "a1"}, {"accountId": "b2"}])
        );
        assert_eq!(
            decode_current(FieldCategory::MultiUser, &encoded).unwrap(),
            FieldValue::List(vec!["a1".to_string(), "b2".to_string()])
        );
    }

    #[test]
    fn test_encode_fixed_key_scalars() {
        assert_eq!(
            encode_full(FieldCategory::AccountRef, "Assignee", &text("acc-1")).unwrap(),
            serde_json::json!({"accountId": "acc-1"})
        );
        assert_eq!(
            encode_full(FieldCategory::NameRef, "Priority", &text("High")).unwrap(),
            serde_json::json!({"name": "High"})
        );
        assert_eq!(
            encode_full(FieldCategory::KeyRef, "Parent", &text("PROJ-1")).unwrap(),
            serde_json::json!({"key": "PROJ-1"})
        );
        assert_eq!(
            encode_full(FieldCategory::TimeTracking, "Time tracking", &text("3h")).unwrap(),
            serde_json::json!({"originalEstimate": "3h"})
        );
    }

    #[test]
    fn test_encode_cascading_from_grammar() {
        let encoded = encode_full(
            FieldCategory::Cascading,
            "Colors",
            &text("Parent values: Red(10059)Level 1 values: Dark(10060)"),
        )
        .unwrap();

        assert_eq!(
            encoded,
            serde_json::json!({"value": "Red", "child": {"value": "Dark"}})
        );
    }

    #[test]
    fn test_encode_numeric_parses_input() {
        let encoded = encode_full(FieldCategory::Numeric, "Story Points", &text("5")).unwrap();
        assert_eq!(encoded, serde_json::json!(5.0));

        let err = encode_full(FieldCategory::Numeric, "Story Points", &text("five")).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));
    }

    #[test]
    fn test_encode_scalar_round_trip() {
        let encoded = encode_full(FieldCategory::Scalar, "Summary", &text("hello")).unwrap();
        assert_eq!(encoded, serde_json::json!("hello"));

        let decoded = decode_current(FieldCategory::Scalar, &encoded).unwrap();
        assert_eq!(decoded, text("hello"));
    }

    #[test]
    fn test_encode_collection_from_explicit_list() {
        let value = FieldValue::List(vec!["Backend".to_string(), "API".to_string()]);

        let encoded = encode_full(FieldCategory::NamedList, "Components", &value).unwrap();

        assert_eq!(
            encoded,
            serde_json::json!([{"name": "Backend"}, {"name": "API"}])
        );
    }

    #[test]
    fn test_scalar_rejects_list_input() {
        let value = FieldValue::List(vec!["a".to_string(), "b".to_string()]);

        let err = encode_full(FieldCategory::Scalar, "Summary", &value).unwrap_err();

        assert_eq!(
            err,
            FieldError::TypeMismatch {
                field: "Summary".to_string(),
                expected: "a string",
                actual: "list",
            }
        );
    }

    #[test]
    fn test_labels_full_replace_is_single_value() {
        let err = encode_full(FieldCategory::Labels, "Labels", &text("a,b")).unwrap_err();
        assert_eq!(
            err,
            FieldError::Arity {
                field: "Labels".to_string(),
                count: 2,
            }
        );

        let err = encode_full(FieldCategory::Version, "Found in", &text("1.0,2.0")).unwrap_err();
        assert!(matches!(err, FieldError::Arity { count: 2, .. }));
    }

    #[test]
    fn test_decode_absent_value() {
        assert_eq!(decode_current(FieldCategory::Select, &Value::Null), None);
        assert_eq!(
            decode_current(FieldCategory::Cascading, &serde_json::json!({"value": "Red"})),
            None
        );
    }

    #[test]
    fn test_decode_mixed_member_shapes() {
        // Remote lists mix single-key objects and raw strings; both decode.
        let raw = serde_json::json!([{"name": "Backend"}, "API"]);

        let decoded = decode_current(FieldCategory::NamedList, &raw).unwrap();

        assert_eq!(
            decoded,
            FieldValue::List(vec!["Backend".to_string(), "API".to_string()])
        );
    }
}
