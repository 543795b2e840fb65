//! Field lookup commands
//!
//! Read-only surface: resolve a descriptor by name, list the canonical type
//! catalog, or decode a field's current value off an issue.

use clap::Args;
use colored::Colorize;
use fieldtools_core::fields::{catalog, coder, FieldCategory, FieldDescriptor, FieldSchema, FieldValue};
use serde::Serialize;

use super::discovery::{self, FieldKind};
use super::{create_jira_client, update, JiraConfig};
use crate::prelude::{println, *};

/// Field subcommands
#[derive(Debug, clap::Subcommand)]
pub enum FieldCommands {
    /// Look up a field's descriptor by display name
    #[clap(name = "find")]
    Find(FindOptions),

    /// List the canonical field type names and their provider identifiers
    #[clap(name = "types")]
    Types(TypesOptions),

    /// Read and decode a field's current value on an issue
    #[clap(name = "value")]
    Value(ValueOptions),

    /// Update a field on an issue
    #[clap(name = "update")]
    Update(update::UpdateFieldOptions),
}

/// Options for looking up a field
#[derive(Args, Debug, Clone)]
pub struct FindOptions {
    /// Field display name (e.g., "Affected Teams")
    pub name: String,

    /// Field family to resolve against
    #[arg(long, value_enum, default_value = "custom")]
    pub kind: FieldKind,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Options for listing the field type catalog
#[derive(Args, Debug, Clone)]
pub struct TypesOptions {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Options for reading a field's current value
#[derive(Args, Debug, Clone)]
pub struct ValueOptions {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,

    /// Field display name
    pub name: String,

    /// Field family to resolve against
    #[arg(long, value_enum, default_value = "custom")]
    pub kind: FieldKind,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// A decoded field value read off an issue
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldValueOutput {
    pub issue_key: String,
    pub field: String,
    pub field_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

/// Resolve a field descriptor by name.
pub async fn find_field_data(name: &str, kind: FieldKind) -> Result<FieldDescriptor> {
    let config = JiraConfig::from_env()?;
    let client = create_jira_client(&config)?;
    let base_url = config.base_url.trim_end_matches('/');

    discovery::resolve_field(&client, base_url, name, kind).await
}

/// Read an issue's current value for a field and decode it via the field's
/// category.
pub async fn field_value_data(
    issue_key: &str,
    name: &str,
    kind: FieldKind,
) -> Result<FieldValueOutput> {
    let config = JiraConfig::from_env()?;
    let client = create_jira_client(&config)?;
    let base_url = config.base_url.trim_end_matches('/');

    let descriptor = discovery::resolve_field(&client, base_url, name, kind).await?;
    let issue = update::fetch_issue(&client, base_url, issue_key).await?;

    let raw = &issue["fields"][&descriptor.id];
    let value = coder::decode_current(FieldCategory::of(&descriptor), raw);

    Ok(FieldValueOutput {
        issue_key: issue_key.to_string(),
        field: descriptor.name.clone(),
        field_id: descriptor.id,
        value,
    })
}

/// Run field subcommands
pub async fn run(cmd: FieldCommands, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running field command...");
    }

    match cmd {
        FieldCommands::Find(options) => find_handler(options).await,
        FieldCommands::Types(options) => types_handler(options),
        FieldCommands::Value(options) => value_handler(options).await,
        FieldCommands::Update(options) => update::handler(options).await,
    }
}

/// CLI handler for the find command
async fn find_handler(options: FindOptions) -> Result<()> {
    let descriptor = find_field_data(&options.name, options.kind).await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Field".bold().cyan(),
        descriptor.name.bright_white()
    ]);
    table.add_row(prettytable::row!["ID".bold().cyan(), descriptor.id.green()]);

    match &descriptor.schema {
        FieldSchema::Custom {
            custom_type,
            raw_type,
        } => {
            table.add_row(prettytable::row!["Kind".bold().cyan(), "custom".yellow()]);
            table.add_row(prettytable::row![
                "Type".bold().cyan(),
                custom_type.bright_blue()
            ]);
            table.add_row(prettytable::row![
                "Schema".bold().cyan(),
                raw_type.bright_black()
            ]);
        }
        FieldSchema::System { key } => {
            table.add_row(prettytable::row!["Kind".bold().cyan(), "system".yellow()]);
            table.add_row(prettytable::row!["Key".bold().cyan(), key.bright_blue()]);
        }
    }

    if let Some(searchable) = descriptor.searchable {
        table.add_row(prettytable::row![
            "Searchable".bold().cyan(),
            searchable.to_string().bright_black()
        ]);
    }

    table.printstd();

    Ok(())
}

/// CLI handler for the types command
fn types_handler(options: TypesOptions) -> Result<()> {
    if options.json {
        let entries: Vec<_> = catalog::entries()
            .iter()
            .map(|(name, id)| serde_json::json!({ "name": name, "type": id }))
            .collect();
        std::println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Name".bold().cyan(),
        "Provider type".bold().cyan()
    ]);

    for (name, id) in catalog::entries() {
        table.add_row(prettytable::row![name.yellow(), id.bright_black()]);
    }

    table.printstd();

    Ok(())
}

/// CLI handler for the value command
async fn value_handler(options: ValueOptions) -> Result<()> {
    let output = field_value_data(&options.issue_key, &options.name, options.kind).await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let rendered = match &output.value {
        Some(FieldValue::Text(s)) => s.clone(),
        Some(FieldValue::List(items)) => items.join(", "),
        None => "(empty)".to_string(),
    };

    std::println!(
        "{} {} {}",
        output.issue_key.bold().cyan(),
        output.field.bright_white(),
        rendered.green()
    );

    Ok(())
}
