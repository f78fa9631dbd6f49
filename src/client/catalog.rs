//! Catalog operations: domains, promotion search, top programs.

use serde_json::Value;

use super::core::FlexOffersClient;
use crate::envelope::{classify_failure, ResponseEnvelope};
use crate::validate;
use crate::xml::{get_path, normalize, project_link, CollectionShape};
use crate::Result;

/// Wire shape of the domains payload. A lone domain arrives as a bare
/// `DomainDto` document instead of a one-element `domains` collection.
const DOMAINS_SHAPE: CollectionShape<'static> = CollectionShape {
    collection_path: "domains.domain",
    singleton_tag: Some("DomainDto"),
};

/// Wire shape of the paginated promotion-link payload.
const LINKS_SHAPE: CollectionShape<'static> = CollectionShape {
    collection_path: "PaginatedResultSetOfLinkDto.Results.LinkDto",
    singleton_tag: None,
};

const TOP_PROGRAMS_LIMIT: usize = 10;
const TOP_PROGRAMS_MESSAGE: &str = "Top programs for promoting and applying";
const TOP_PROGRAMS_UNSUCCESSFUL_MESSAGE: &str = "API returned unsuccessful response";

impl FlexOffersClient {
    /// Fetch the caller's domain list.
    ///
    /// The decoded payload is returned verbatim; only the domain count is
    /// derived, since the wire renders a single domain as a bare record.
    pub async fn get_domains(&self, api_key: Option<&str>, limit: u32) -> ResponseEnvelope {
        let key = match validate::require_api_key(api_key, self.config.api_key.as_deref()) {
            Ok(key) => key,
            Err(rejection) => return rejection,
        };
        match self.fetch_domains(&key, limit).await {
            Ok(envelope) => envelope,
            Err(err) => classify_failure(&err),
        }
    }

    async fn fetch_domains(&self, api_key: &str, limit: u32) -> Result<ResponseEnvelope> {
        let query = vec![("limit".to_string(), limit.to_string())];
        let tree = self.get_xml("/domains", api_key, query).await?;
        let count = normalize(&tree, DOMAINS_SHAPE).count;
        Ok(ResponseEnvelope::success(tree).with_total_count(count as i64))
    }

    /// Search promotion links by name, paginated.
    ///
    /// Each returned record is projected down to the six published link
    /// fields; upstream order is preserved and pagination is echoed from
    /// the caller, not recomputed.
    pub async fn search_promotions(
        &self,
        api_key: Option<&str>,
        name: &str,
        page: u32,
        page_size: u32,
    ) -> ResponseEnvelope {
        let key = match validate::require_api_key(api_key, self.config.api_key.as_deref()) {
            Ok(key) => key,
            Err(rejection) => return rejection,
        };
        if let Err(rejection) = validate::require_search_term(name) {
            return rejection;
        }
        match self.fetch_promotions(&key, name, page, page_size).await {
            Ok(envelope) => envelope,
            Err(err) => classify_failure(&err),
        }
    }

    async fn fetch_promotions(
        &self,
        api_key: &str,
        name: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResponseEnvelope> {
        let query = vec![
            ("names".to_string(), name.to_string()),
            ("page".to_string(), page.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ];
        let tree = self.get_xml("/promotions", api_key, query).await?;
        let normalized = normalize(&tree, LINKS_SHAPE);
        let links: Vec<Value> = normalized.items.iter().map(project_link).collect();
        let total = total_count(&tree).unwrap_or(normalized.count as i64);

        Ok(ResponseEnvelope::success(Value::Array(links))
            .with_total_count(total)
            .with_page(page, page_size))
    }

    /// Top affiliate programs worth promoting and applying to: at most
    /// ten, in provider order, optionally scoped by country.
    pub async fn get_top_programs(
        &self,
        api_key: Option<&str>,
        country_code: Option<&str>,
    ) -> ResponseEnvelope {
        let key = match validate::require_api_key(api_key, self.config.api_key.as_deref()) {
            Ok(key) => key,
            Err(rejection) => return rejection,
        };
        match self
            .fetch_programs(&key, country_code, false, TOP_PROGRAMS_UNSUCCESSFUL_MESSAGE)
            .await
        {
            Ok(programs) => {
                let top: Vec<Value> = programs.into_iter().take(TOP_PROGRAMS_LIMIT).collect();
                let count = top.len() as i64;
                ResponseEnvelope::success(Value::Array(top))
                    .with_total_count(count)
                    .with_message(TOP_PROGRAMS_MESSAGE)
            }
            Err(err) => classify_failure(&err),
        }
    }
}

/// `TotalCount` arrives as a numeric string on the XML wire; tolerate
/// either encoding and fall back to the observed element count.
fn total_count(tree: &Value) -> Option<i64> {
    let raw = get_path(tree, "PaginatedResultSetOfLinkDto.TotalCount")?;
    raw.as_i64()
        .or_else(|| raw.as_str().and_then(|s| s.trim().parse().ok()))
}
