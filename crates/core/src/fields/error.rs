//! Error taxonomy for field resolution and updates
//!
//! Every variant is raised synchronously at the point of detection. Shape,
//! arity, and operation errors fire before the corresponding network call is
//! issued; callers are expected to match on the variant and react.

/// Errors produced by the field normalization and update engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Discovery found no field with the requested name
    #[error("No {kind} field found with name '{name}'")]
    FieldNotFound { kind: &'static str, name: String },

    /// A canonical type name outside the closed catalog set
    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),

    /// The input value's shape doesn't match what the field type requires
    #[error("Field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Full replace attempted with more than one value on a single-value path
    #[error("Field '{field}' takes a single value on full replace, got {count}; use add/remove to edit members")]
    Arity { field: String, count: usize },

    /// Add of a value already present in the option set
    #[error("Value '{0}' is already present")]
    DuplicateValue(String),

    /// Remove of a value absent from the option set
    #[error("Value '{0}' is not present")]
    ValueNotFound(String),

    /// An option directive other than add or remove
    #[error("Invalid option operation '{0}', expected 'add' or 'remove'")]
    InvalidOperation(String),

    /// Add/remove attempted on a field kind without list-membership semantics
    #[error("Field type '{0}' has no add/remove semantics; set the full value instead")]
    UnsupportedField(String),

    /// Malformed cascading-select input
    #[error("Malformed cascading value '{input}': {reason}")]
    CascadingParse { input: String, reason: String },
}
