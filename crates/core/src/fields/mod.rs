//! Field resolution, value coding, and update planning
//!
//! This module contains pure functions only. The shell fetches field metadata
//! and issue documents over HTTP, then calls into here to pick the matching
//! field, translate user input into the wire shape the field requires, and
//! build the body of the next edit request.

pub mod cascading;
pub mod catalog;
pub mod coder;
pub mod descriptor;
pub mod error;
pub mod options;
pub mod payload;

pub use cascading::CascadingChoice;
pub use coder::{multi_field, FieldCategory, FieldValue};
pub use descriptor::{
    match_field_by_name, match_system_field, FieldDescriptor, FieldSchema, JiraFieldBean,
    JiraFieldSchema, JiraFieldSearchResponse,
};
pub use error::FieldError;
pub use options::{amend, extract_options, OptionOp, OptionSet};
