//! Update a field's value on an issue
//!
//! The orchestrator resolves the field, plans the request body in the core,
//! and submits it. Full replaces and clears are a single PUT; add/remove
//! directives issue one read-modify-write round trip per value, sequentially
//! and in input order, with no rollback; a failed value is recorded and the
//! remaining values still run.

use clap::Args;
use colored::Colorize;
use fieldtools_core::fields::{payload, FieldCategory, FieldDescriptor, FieldError, FieldValue, OptionOp};
use serde::Serialize;

use super::discovery::{self, FieldKind};
use super::{create_jira_client, urls, JiraConfig};
use crate::prelude::*;

/// Update a field on an issue
#[derive(Args, Debug, Clone)]
pub struct UpdateFieldOptions {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,

    /// Field display name (e.g., "Affected Teams")
    pub field: String,

    /// New value; comma-separated for multi-valued fields. Omit to clear the
    /// field.
    pub value: Option<String>,

    /// Field family to resolve against
    #[arg(long, value_enum, default_value = "custom")]
    pub kind: FieldKind,

    /// Edit membership instead of replacing the value ("add" or "remove")
    #[arg(long)]
    pub op: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Outcome of one submitted change
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldUpdateResult {
    pub value: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output structure for the update command
#[derive(Debug, Serialize)]
pub struct UpdateFieldOutput {
    pub issue_key: String,
    pub field: String,
    pub field_id: String,
    pub results: Vec<FieldUpdateResult>,
    pub partial_failure: bool,
}

/// Update field data - handles all I/O and Jira API interactions
///
/// This is the imperative shell that handles:
/// - Resolving the field descriptor by name and kind
/// - Submitting planned request bodies (PUT, or POST for watchers)
/// - Tracking per-value outcomes on the add/remove path
pub async fn update_field_data(options: UpdateFieldOptions) -> Result<UpdateFieldOutput> {
    let config = JiraConfig::from_env()?;
    let client = create_jira_client(&config)?;
    let base_url = config.base_url.trim_end_matches('/');

    let descriptor =
        discovery::resolve_field(&client, base_url, &options.field, options.kind).await?;
    let category = FieldCategory::of(&descriptor);

    let value = options
        .value
        .clone()
        .map(FieldValue::Text)
        .filter(|v| !v.is_empty());

    let mut results = Vec::new();

    match (value, options.op.as_deref()) {
        // An empty value clears the field, directive or not.
        (None, _) => {
            let body = payload::plan_clear(&descriptor);
            put_issue(&client, base_url, &options.issue_key, &body).await?;
            results.push(FieldUpdateResult {
                value: "(cleared)".to_string(),
                success: true,
                payload: Some(body),
                error: None,
            });
        }
        (Some(value), None) => {
            // Watchers live on their own sub-resource and take a bare
            // account id via POST instead of a fields body.
            if descriptor.system_key() == Some("watches") {
                let account_id = match &value {
                    FieldValue::Text(s) => s.trim().to_string(),
                    FieldValue::List(_) => {
                        return Err(eyre!(FieldError::TypeMismatch {
                            field: descriptor.name.clone(),
                            expected: "an account id",
                            actual: "list",
                        }))
                    }
                };
                let body = serde_json::json!(account_id);
                post_watchers(&client, base_url, &options.issue_key, &body).await?;
                results.push(FieldUpdateResult {
                    value: account_id,
                    success: true,
                    payload: Some(body),
                    error: None,
                });
            } else {
                let rendered = match &value {
                    FieldValue::Text(s) => s.clone(),
                    FieldValue::List(items) => items.join(","),
                };
                let body = payload::plan_replace(&descriptor, &value)?;
                put_issue(&client, base_url, &options.issue_key, &body).await?;
                results.push(FieldUpdateResult {
                    value: rendered,
                    success: true,
                    payload: Some(body),
                    error: None,
                });
            }
        }
        (Some(value), Some(op)) => {
            let op = OptionOp::parse(op)?;

            // Detectable before any request: cascading selections have no
            // membership to edit.
            if category == FieldCategory::Cascading {
                return Err(eyre!(FieldError::UnsupportedField(descriptor.name.clone())));
            }

            for token in value.tokens() {
                match apply_option_edit(
                    &client,
                    base_url,
                    &options.issue_key,
                    &descriptor,
                    op,
                    &token,
                )
                .await
                {
                    Ok(body) => results.push(FieldUpdateResult {
                        value: token,
                        success: true,
                        payload: Some(body),
                        error: None,
                    }),
                    Err(e) => results.push(FieldUpdateResult {
                        value: token,
                        success: false,
                        payload: None,
                        error: Some(e.to_string()),
                    }),
                }
            }
        }
    }

    let partial_failure = results.iter().any(|r| !r.success);

    Ok(UpdateFieldOutput {
        issue_key: options.issue_key,
        field: descriptor.name,
        field_id: descriptor.id,
        results,
        partial_failure,
    })
}

/// One add/remove round trip: fetch the issue's current state, plan the
/// amended membership, and submit it.
async fn apply_option_edit(
    client: &reqwest::Client,
    base_url: &str,
    issue_key: &str,
    descriptor: &FieldDescriptor,
    op: OptionOp,
    value: &str,
) -> Result<serde_json::Value> {
    let issue = fetch_issue(client, base_url, issue_key).await?;
    let body = payload::plan_option_edit(&issue, descriptor, op, value)?;

    log::debug!("{} '{}' on {}", op.as_str(), value, descriptor.id);
    put_issue(client, base_url, issue_key, &body).await?;

    Ok(body)
}

/// Fetch an issue document by key.
pub(crate) async fn fetch_issue(
    client: &reqwest::Client,
    base_url: &str,
    issue_key: &str,
) -> Result<serde_json::Value> {
    let url = urls::issue(base_url, issue_key);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch issue: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch issue [{}]: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse issue response: {}", e))
}

/// Submit an edit body against the issue endpoint.
async fn put_issue(
    client: &reqwest::Client,
    base_url: &str,
    issue_key: &str,
    body: &serde_json::Value,
) -> Result<()> {
    let url = urls::issue(base_url, issue_key);

    let response = client
        .put(&url)
        .json(body)
        .send()
        .await
        .map_err(|e| eyre!("Failed to update issue: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to update issue [{}]: {}", status, body));
    }

    Ok(())
}

/// Add a watcher via the watchers sub-resource.
async fn post_watchers(
    client: &reqwest::Client,
    base_url: &str,
    issue_key: &str,
    body: &serde_json::Value,
) -> Result<()> {
    let url = urls::watchers(base_url, issue_key);

    let response = client
        .post(&url)
        .json(body)
        .send()
        .await
        .map_err(|e| eyre!("Failed to add watcher: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to add watcher [{}]: {}", status, body));
    }

    Ok(())
}

/// CLI handler for the update command
pub async fn handler(options: UpdateFieldOptions) -> Result<()> {
    let output = update_field_data(options.clone()).await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    std::println!(
        "{}",
        format!("Updated field: {} on {}", output.field, output.issue_key)
            .green()
            .bold()
    );
    std::println!();

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Value".bold().cyan(),
        "Status".bold().cyan(),
        "Detail".bold().cyan()
    ]);

    for result in &output.results {
        let status_str = if result.success { "✓" } else { "✗" };
        let status_colored = if result.success {
            status_str.green().bold()
        } else {
            status_str.red().bold()
        };

        let detail = result.error.clone().unwrap_or_default();
        let detail_colored = if result.success {
            detail.green()
        } else {
            detail.red()
        };

        table.add_row(prettytable::row![
            result.value.yellow(),
            status_colored,
            detail_colored
        ]);
    }

    table.printstd();

    if output.partial_failure {
        std::println!();
        std::println!(
            "{}",
            "⚠ Some values failed to update. Check errors above."
                .yellow()
                .bold()
        );
    }

    Ok(())
}
