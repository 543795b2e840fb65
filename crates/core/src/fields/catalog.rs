//! Static mapping from canonical field-type names to Jira type identifiers
//!
//! The canonical names form a closed set. Standard custom types map to
//! `com.atlassian.jira.plugin.system.customfieldtypes:*` identifiers, the
//! agile types to `com.pyxis.greenhopper.jira:gh-*`, and the remaining
//! entries to stable system field keys.

use super::error::FieldError;

/// Canonical name to provider identifier, in catalog order.
const FIELD_TYPES: &[(&str, &str)] = &[
    (
        "cascading-select",
        "com.atlassian.jira.plugin.system.customfieldtypes:cascadingselect",
    ),
    (
        "date-picker",
        "com.atlassian.jira.plugin.system.customfieldtypes:datepicker",
    ),
    (
        "date-time",
        "com.atlassian.jira.plugin.system.customfieldtypes:datetime",
    ),
    (
        "float",
        "com.atlassian.jira.plugin.system.customfieldtypes:float",
    ),
    (
        "group-picker",
        "com.atlassian.jira.plugin.system.customfieldtypes:grouppicker",
    ),
    (
        "import-id",
        "com.atlassian.jira.plugin.system.customfieldtypes:importid",
    ),
    (
        "labels",
        "com.atlassian.jira.plugin.system.customfieldtypes:labels",
    ),
    (
        "multi-checkboxes",
        "com.atlassian.jira.plugin.system.customfieldtypes:multicheckboxes",
    ),
    (
        "multi-group-picker",
        "com.atlassian.jira.plugin.system.customfieldtypes:multigrouppicker",
    ),
    (
        "multi-select",
        "com.atlassian.jira.plugin.system.customfieldtypes:multiselect",
    ),
    (
        "multi-user-picker",
        "com.atlassian.jira.plugin.system.customfieldtypes:multiuserpicker",
    ),
    (
        "multi-version",
        "com.atlassian.jira.plugin.system.customfieldtypes:multiversion",
    ),
    (
        "project",
        "com.atlassian.jira.plugin.system.customfieldtypes:project",
    ),
    (
        "radio-buttons",
        "com.atlassian.jira.plugin.system.customfieldtypes:radiobuttons",
    ),
    (
        "read-only",
        "com.atlassian.jira.plugin.system.customfieldtypes:readonlyfield",
    ),
    (
        "select",
        "com.atlassian.jira.plugin.system.customfieldtypes:select",
    ),
    (
        "textarea",
        "com.atlassian.jira.plugin.system.customfieldtypes:textarea",
    ),
    (
        "textfield",
        "com.atlassian.jira.plugin.system.customfieldtypes:textfield",
    ),
    (
        "url",
        "com.atlassian.jira.plugin.system.customfieldtypes:url",
    ),
    (
        "user-picker",
        "com.atlassian.jira.plugin.system.customfieldtypes:userpicker",
    ),
    (
        "version",
        "com.atlassian.jira.plugin.system.customfieldtypes:version",
    ),
    ("sprint", "com.pyxis.greenhopper.jira:gh-sprint"),
    ("epic-link", "com.pyxis.greenhopper.jira:gh-epic-link"),
    ("epic-status", "com.pyxis.greenhopper.jira:gh-epic-status"),
    ("epic-name", "com.pyxis.greenhopper.jira:gh-epic-label"),
    ("components", "components"),
    ("fix-versions", "fixVersions"),
    ("versions", "versions"),
    ("original-estimate", "timeoriginalestimate"),
    ("time-tracking", "timetracking"),
    ("reporter", "reporter"),
    ("assignee", "assignee"),
    ("description", "description"),
];

/// Resolve a canonical field-type name to its provider identifier.
///
/// # Arguments
/// * `canonical` - One of the closed set of canonical type names
///
/// # Returns
/// The provider identifier, or `FieldError::UnknownFieldType` for a name
/// outside the set.
pub fn provider_type_id(canonical: &str) -> Result<&'static str, FieldError> {
    FIELD_TYPES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, id)| *id)
        .ok_or_else(|| FieldError::UnknownFieldType(canonical.to_string()))
}

/// The full catalog, in declaration order.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    FIELD_TYPES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_canonical_name_resolves_to_a_non_empty_id() {
        for (name, _) in entries() {
            let id = provider_type_id(name).expect("catalog entry must resolve");
            assert!(!id.is_empty(), "empty provider id for '{name}'");
        }
    }

    #[test]
    fn test_no_two_canonical_names_collide() {
        let names: HashSet<_> = entries().iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), entries().len(), "duplicate canonical name");

        let ids: HashSet<_> = entries().iter().map(|(_, id)| *id).collect();
        assert_eq!(ids.len(), entries().len(), "duplicate provider identifier");
    }

    #[test]
    fn test_lookup_known_entries() {
        assert_eq!(
            provider_type_id("multi-select").unwrap(),
            "com.atlassian.jira.plugin.system.customfieldtypes:multiselect"
        );
        assert_eq!(
            provider_type_id("sprint").unwrap(),
            "com.pyxis.greenhopper.jira:gh-sprint"
        );
        assert_eq!(provider_type_id("fix-versions").unwrap(), "fixVersions");
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = provider_type_id("tag-cloud").unwrap_err();
        assert_eq!(err, FieldError::UnknownFieldType("tag-cloud".to_string()));
    }
}
