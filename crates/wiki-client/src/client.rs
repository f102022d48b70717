use std::fmt::Debug;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::WikiConfig;
use crate::error::WikiError;
use crate::params::{
    AllCategoriesQuery, BacklinksQuery, CategoryMembersQuery, HistoryQuery, LinksQuery,
    PageQuery, ParseQuery, RecentChangesQuery, SearchQuery,
};
use crate::response::{ParseResponse, QueryResponse};
use crate::types::{
    Category, CategoryMember, PageContent, RecentChange, Revision, SearchResult,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("wiki-mcp/", env!("CARGO_PKG_VERSION"));

/// Client for one wiki's `api.php` query endpoint.
///
/// Holds only the resolved endpoint, the optional bearer token, and a
/// connection pool; cloning is cheap and a single instance is safe to share
/// across concurrent invocations. Every operation is a single round trip
/// bounded by a 30-second timeout, with no retries.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    api_url: String,
    base_url: String,
    auth_token: Option<String>,
}

impl WikiClient {
    pub fn new(config: &WikiConfig) -> Result<Self, WikiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            api_url: format!("{}/w/api.php", config.base_url),
            base_url: config.base_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Full-text search. `limit` and `namespace` are forwarded as given;
    /// callers clamp before handing them over.
    pub async fn search_pages(
        &self,
        query: &str,
        limit: u32,
        namespace: Option<u32>,
    ) -> Result<Vec<SearchResult>, WikiError> {
        let response: QueryResponse = self
            .get_json(&SearchQuery::new(query, limit, namespace))
            .await?;
        Ok(response.query.search.into_iter().map(Into::into).collect())
    }

    /// Current text and metadata of a page, taken from its single most
    /// recent revision. Returns `Ok(None)` when the wiki reports the page
    /// missing.
    pub async fn get_page(&self, title: &str) -> Result<Option<PageContent>, WikiError> {
        let response: QueryResponse = self.get_json(&PageQuery::new(title)).await?;
        Ok(response
            .query
            .pages
            .into_iter()
            .next()
            .and_then(|page| page.into_content()))
    }

    /// Rendered HTML body of a page; empty string when the wiki returns
    /// none.
    pub async fn get_parsed_page(&self, title: &str) -> Result<String, WikiError> {
        let response: ParseResponse = self.get_json(&ParseQuery::new(title)).await?;
        Ok(response.parse.text)
    }

    /// Revision history in the order the wiki returns it (newest first).
    /// Empty when the title is unknown.
    pub async fn get_page_history(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<Revision>, WikiError> {
        let response: QueryResponse = self.get_json(&HistoryQuery::new(title, limit)).await?;
        Ok(response
            .query
            .pages
            .into_iter()
            .next()
            .map(|page| page.revisions.into_iter().map(Revision::from).collect())
            .unwrap_or_default())
    }

    /// Categories with aggregate member counts, optionally restricted by a
    /// leading prefix.
    pub async fn list_categories(
        &self,
        prefix: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Category>, WikiError> {
        let response: QueryResponse = self
            .get_json(&AllCategoriesQuery::new(prefix, limit))
            .await?;
        Ok(response
            .query
            .allcategories
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Members of a category. The category title is normalized with the
    /// namespace prefix before the call; `member_type` restricts to one of
    /// `page`, `subcat`, or `file`.
    pub async fn get_category_members(
        &self,
        category: &str,
        limit: u32,
        member_type: Option<&str>,
    ) -> Result<Vec<CategoryMember>, WikiError> {
        let response: QueryResponse = self
            .get_json(&CategoryMembersQuery::new(category, limit, member_type))
            .await?;
        Ok(response
            .query
            .categorymembers
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Recent wiki events, each carrying both byte lengths so callers can
    /// derive a delta.
    pub async fn get_recent_changes(
        &self,
        limit: u32,
        namespace: Option<u32>,
        change_type: Option<&str>,
    ) -> Result<Vec<RecentChange>, WikiError> {
        let response: QueryResponse = self
            .get_json(&RecentChangesQuery::new(limit, namespace, change_type))
            .await?;
        Ok(response
            .query
            .recentchanges
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Destination titles linked from a page; empty when the page is
    /// unknown or has no links.
    pub async fn get_page_links(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<String>, WikiError> {
        let response: QueryResponse = self.get_json(&LinksQuery::new(title, limit)).await?;
        Ok(response
            .query
            .pages
            .into_iter()
            .next()
            .map(|page| page.links.into_iter().map(|link| link.title).collect())
            .unwrap_or_default())
    }

    /// Titles of pages that link to the given page.
    pub async fn get_backlinks(
        &self,
        title: &str,
        limit: u32,
    ) -> Result<Vec<String>, WikiError> {
        let response: QueryResponse = self.get_json(&BacklinksQuery::new(title, limit)).await?;
        Ok(response
            .query
            .backlinks
            .into_iter()
            .map(|link| link.title)
            .collect())
    }

    /// Canonical browsable address of a page: spaces become underscores,
    /// the result is percent-encoded under the standard article path.
    pub fn page_url(&self, title: &str) -> String {
        let underscored = title.replace(' ', "_");
        format!("{}/wiki/{}", self.base_url, urlencoding::encode(&underscored))
    }

    /// Human-readable rendering of an ISO timestamp, in UTC. Input that does
    /// not parse is returned unchanged.
    pub fn format_timestamp(timestamp: &str) -> String {
        match chrono::DateTime::parse_from_rfc3339(timestamp) {
            Ok(parsed) => parsed
                .with_timezone(&chrono::Utc)
                .format("%B %-d, %Y at %H:%M")
                .to_string(),
            Err(_) => timestamp.to_string(),
        }
    }

    /// Shared GET path: fixed format selectors, typed operation parameters,
    /// bearer token when configured. An `error` object embedded in an
    /// otherwise-successful body is surfaced with its description.
    async fn get_json<T>(&self, params: &(impl Serialize + Debug)) -> Result<T, WikiError>
    where
        T: DeserializeOwned,
    {
        log::debug!("wiki query {params:?}");
        let mut request = self
            .http
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?.error_for_status()?;
        let body: serde_json::Value = response.json().await?;
        if let Some(error) = body.get("error") {
            let message = error
                .get("info")
                .or_else(|| error.get("code"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error")
                .to_string();
            return Err(WikiError::Api(message));
        }
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikiClient {
        let config = WikiConfig::new(Some("https://wiki.example.org".into()), None).unwrap();
        WikiClient::new(&config).unwrap()
    }

    #[test]
    fn page_url_replaces_spaces_with_underscores() {
        assert_eq!(
            client().page_url("Main Page"),
            "https://wiki.example.org/wiki/Main_Page"
        );
    }

    #[test]
    fn page_url_percent_encodes_and_round_trips() {
        let url = client().page_url("C++");
        assert_eq!(url, "https://wiki.example.org/wiki/C%2B%2B");

        let encoded = url.rsplit('/').next().unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), "C++");
    }

    #[test]
    fn format_timestamp_renders_month_name() {
        assert_eq!(
            WikiClient::format_timestamp("2024-01-15T03:45:00Z"),
            "January 15, 2024 at 03:45"
        );
    }

    #[test]
    fn format_timestamp_passes_through_garbage() {
        assert_eq!(WikiClient::format_timestamp("not a date"), "not a date");
    }
}
