//! Field discovery against the Jira field endpoints
//!
//! Every lookup re-fetches from the API; descriptors are never cached across
//! calls, so there is no staleness to manage. Custom fields go through the
//! paginated search endpoint, system fields through the full field list.

use fieldtools_core::fields::{
    match_field_by_name, match_system_field, FieldDescriptor, FieldError, JiraFieldBean,
    JiraFieldSearchResponse,
};

use super::urls;
use crate::prelude::*;

/// Which family of fields to resolve a name against
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FieldKind {
    Custom,
    System,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Custom => "custom",
            FieldKind::System => "system",
        }
    }
}

/// Locate a custom field by exact name, paging through the search endpoint.
///
/// Pages are walked in order until a match is found or the declared total is
/// exhausted. A failed page fetch is an error, not an empty result: "the
/// server broke" and "the field does not exist" must stay distinguishable.
pub async fn find_custom_field(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<Option<FieldDescriptor>> {
    let mut start_at = 0u64;

    loop {
        let url = urls::field_search(base_url, name, start_at);
        log::debug!("searching custom fields at offset {start_at}");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| eyre!("Failed to search custom fields: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(eyre!("Jira field search error [{}]: {}", status, body));
        }

        let page: JiraFieldSearchResponse = response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse field search response: {}", e))?;

        if let Some(bean) = match_field_by_name(&page.values, name) {
            return Ok(Some(FieldDescriptor::from_bean(bean.clone())));
        }

        let total = page.total.unwrap_or(0);
        start_at += urls::FIELD_SEARCH_PAGE_SIZE;

        if page.values.is_empty() || start_at >= total {
            return Ok(None);
        }
    }
}

/// Locate a system field from the full field list: exact name match first,
/// then substring fallback.
pub async fn find_system_field(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<Option<FieldDescriptor>> {
    let url = urls::fields(base_url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch field list: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Jira field list error [{}]: {}", status, body));
    }

    let beans: Vec<JiraFieldBean> = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse field list response: {}", e))?;

    Ok(match_system_field(&beans, name).map(|bean| FieldDescriptor::from_bean(bean.clone())))
}

/// Resolve a field by kind, surfacing the typed not-found error when the
/// name matches nothing.
pub async fn resolve_field(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    kind: FieldKind,
) -> Result<FieldDescriptor> {
    let found = match kind {
        FieldKind::Custom => find_custom_field(client, base_url, name).await?,
        FieldKind::System => find_system_field(client, base_url, name).await?,
    };

    found.ok_or_else(|| {
        eyre!(FieldError::FieldNotFound {
            kind: kind.as_str(),
            name: name.to_string(),
        })
    })
}
