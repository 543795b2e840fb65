//! Resolved-field model and field-list matching
//!
//! The wire structs mirror the two field endpoints: the paginated custom
//! field search returns pages of beans wrapped in a result envelope, while
//! the system field list returns a bare array of the same bean shape. The
//! matching functions are pure so discovery's selection logic can be tested
//! without HTTP.

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Models (Input from API)
// ============================================================================

/// One page of results from the custom-field search endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct JiraFieldSearchResponse {
    pub values: Vec<JiraFieldBean>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    #[serde(rename = "isLast")]
    pub is_last: Option<bool>,
    #[serde(default)]
    #[serde(rename = "startAt")]
    pub start_at: Option<u64>,
    #[serde(default)]
    #[serde(rename = "maxResults")]
    pub max_results: Option<u64>,
}

/// A single field entry as returned by the field endpoints
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraFieldBean {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub custom: Option<bool>,
    #[serde(default)]
    pub searchable: Option<bool>,
    #[serde(default)]
    pub schema: Option<JiraFieldSchema>,
}

/// Nested schema info on a field bean
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JiraFieldSchema {
    /// The schema's primitive type (e.g., "string", "array", "user")
    #[serde(rename = "type")]
    pub raw_type: String,
    /// Provider type identifier, present only on custom fields
    #[serde(default)]
    pub custom: Option<String>,
}

// ============================================================================
// Domain Model
// ============================================================================

/// A resolved field.
///
/// Immutable once constructed; every update call re-resolves the field
/// instead of mutating or caching a previous descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    pub schema: FieldSchema,
}

/// Custom and system fields are mutually exclusive wire families; the enum
/// makes holding both (or neither) unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSchema {
    Custom {
        /// Full provider type identifier (e.g.
        /// `com.atlassian.jira.plugin.system.customfieldtypes:multiselect`)
        custom_type: String,
        /// The schema's primitive type (e.g., "string", "array")
        raw_type: String,
    },
    System {
        /// Stable system key (e.g., "assignee", "components")
        key: String,
    },
}

impl FieldDescriptor {
    /// Build a descriptor from a wire bean.
    ///
    /// A bean whose schema carries a provider type identifier becomes a
    /// custom descriptor; everything else is treated as a system field keyed
    /// by its stable key (falling back to the id when the key is absent).
    pub fn from_bean(bean: JiraFieldBean) -> Self {
        let schema = match bean.schema {
            Some(JiraFieldSchema {
                raw_type,
                custom: Some(custom_type),
            }) => FieldSchema::Custom {
                custom_type,
                raw_type,
            },
            _ => FieldSchema::System {
                key: bean.key.unwrap_or_else(|| bean.id.clone()),
            },
        };

        FieldDescriptor {
            id: bean.id,
            name: bean.name,
            searchable: bean.searchable,
            schema,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.schema, FieldSchema::Custom { .. })
    }

    /// The short type tag of a custom field: the provider identifier's final
    /// `:`-separated part (e.g. "multiselect").
    pub fn custom_kind(&self) -> Option<&str> {
        match &self.schema {
            FieldSchema::Custom { custom_type, .. } => {
                Some(custom_type.rsplit(':').next().unwrap_or(custom_type))
            }
            FieldSchema::System { .. } => None,
        }
    }

    /// The stable key of a system field.
    pub fn system_key(&self) -> Option<&str> {
        match &self.schema {
            FieldSchema::System { key } => Some(key),
            FieldSchema::Custom { .. } => None,
        }
    }
}

// ============================================================================
// Pure Matching Functions
// ============================================================================

/// Find a field by exact name within one page of search results.
///
/// The remote search is a fuzzy query; the match that counts is the exact
/// (case-insensitive) display name.
pub fn match_field_by_name<'a>(
    beans: &'a [JiraFieldBean],
    name: &str,
) -> Option<&'a JiraFieldBean> {
    beans.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Find a system field in the full field list: exact name match first,
/// substring fallback second.
pub fn match_system_field<'a>(
    beans: &'a [JiraFieldBean],
    name: &str,
) -> Option<&'a JiraFieldBean> {
    if let Some(exact) = beans.iter().find(|b| b.name.eq_ignore_ascii_case(name)) {
        return Some(exact);
    }

    let needle = name.to_lowercase();
    beans
        .iter()
        .find(|b| b.name.to_lowercase().contains(&needle))
}
