//! MCP tools over the wiki query client.
//!
//! Each tool validates its declared input, calls [`WikiClient`], and returns
//! a single pre-rendered text block. Empty results are ordinary text, never
//! errors; remote failures propagate as invocation errors.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use wiki_client::params::normalize_category_title;
use wiki_client::{WikiClient, WikiError};

use crate::render;

/// Limits are clamped locally instead of relying on the remote service's own
/// bounds enforcement.
const MAX_LIMIT: u32 = 500;

/// Wiki query MCP service.
///
/// Holds only the client and the tool router; no state survives an
/// invocation, so one instance may serve concurrent callers and a fresh
/// instance per connection behaves identically.
#[derive(Clone)]
pub struct WikiService {
    client: WikiClient,
    tool_router: ToolRouter<Self>,
}

impl WikiService {
    pub fn new(client: WikiClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for WikiService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Read-only access to a wiki. Use 'search_pages' to find pages, 'get_page' to read one, 'get_page_history' for revisions, 'list_categories'/'get_category_members' to browse categories, 'get_recent_changes' for activity, and 'get_page_links' for the link graph.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

fn wiki_error(err: WikiError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchPagesRequest {
    /// Full-text search query
    #[schemars(description = "Full-text search query")]
    pub query: String,

    /// Maximum number of results (default: 10)
    #[schemars(description = "Maximum number of results")]
    pub limit: Option<u32>,

    /// Namespace id to restrict the search to
    #[schemars(description = "Namespace id to restrict the search to")]
    pub namespace: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageRequest {
    /// Page title
    #[schemars(description = "Page title")]
    pub title: String,

    /// Content format: wikitext (default) or html
    #[schemars(description = "Content format: wikitext or html")]
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageHistoryRequest {
    /// Page title
    #[schemars(description = "Page title")]
    pub title: String,

    /// Maximum number of revisions (default: 20)
    #[schemars(description = "Maximum number of revisions")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListCategoriesRequest {
    /// Restrict to categories starting with this prefix
    #[schemars(description = "Restrict to categories starting with this prefix")]
    pub prefix: Option<String>,

    /// Maximum number of categories (default: 20)
    #[schemars(description = "Maximum number of categories")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCategoryMembersRequest {
    /// Category name, with or without the Category: prefix
    #[schemars(description = "Category name, with or without the Category: prefix")]
    pub category: String,

    /// Maximum number of members (default: 50)
    #[schemars(description = "Maximum number of members")]
    pub limit: Option<u32>,

    /// Restrict to one member kind: page, subcat, or file
    #[serde(rename = "type")]
    #[schemars(description = "Restrict to one member kind: page, subcat, or file")]
    pub member_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecentChangesRequest {
    /// Maximum number of changes (default: 20)
    #[schemars(description = "Maximum number of changes")]
    pub limit: Option<u32>,

    /// Namespace id to restrict the listing to
    #[schemars(description = "Namespace id to restrict the listing to")]
    pub namespace: Option<u32>,

    /// Restrict to one change kind: edit, new, or log
    #[serde(rename = "type")]
    #[schemars(description = "Restrict to one change kind: edit, new, or log")]
    pub change_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageLinksRequest {
    /// Page title
    #[schemars(description = "Page title")]
    pub title: String,

    /// Link direction: from (outgoing, default) or to (backlinks)
    #[schemars(description = "Link direction: from (outgoing) or to (backlinks)")]
    pub direction: Option<String>,

    /// Maximum number of links (default: 50)
    #[schemars(description = "Maximum number of links")]
    pub limit: Option<u32>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl WikiService {
    /// Full-text search
    #[tool(
        description = "Search wiki pages by full text. Returns a numbered list with title, URL, size, word count, and snippet for each match."
    )]
    pub async fn search_pages(
        &self,
        Parameters(request): Parameters<SearchPagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.unwrap_or(10).clamp(1, MAX_LIMIT);
        let results = self
            .client
            .search_pages(&request.query, limit, request.namespace)
            .await
            .map_err(wiki_error)?;

        if results.is_empty() {
            return Ok(text_result(render::no_search_results(&request.query)));
        }

        let mut text = format!("Found {} results for \"{}\":\n", results.len(), request.query);
        for (index, result) in results.iter().enumerate() {
            text.push_str(&format!(
                "\n{}. {}\n   URL: {}\n   Size: {} bytes | Words: {}\n   Last modified: {}\n   {}\n",
                index + 1,
                result.title,
                self.client.page_url(&result.title),
                result.size,
                result.word_count,
                WikiClient::format_timestamp(&result.timestamp),
                render::strip_html(&result.snippet).trim(),
            ));
        }

        Ok(text_result(text))
    }

    /// Read one page
    #[tool(
        description = "Get a wiki page's content and metadata. Set format to 'html' for the rendered body instead of wikitext."
    )]
    pub async fn get_page(
        &self,
        Parameters(request): Parameters<GetPageRequest>,
    ) -> Result<CallToolResult, McpError> {
        let format = request.format.as_deref().unwrap_or("wikitext");
        if !matches!(format, "wikitext" | "html") {
            return Err(McpError::invalid_params(
                format!("unknown format \"{format}\" (expected wikitext or html)"),
                None,
            ));
        }

        let Some(page) = self
            .client
            .get_page(&request.title)
            .await
            .map_err(wiki_error)?
        else {
            return Ok(text_result(render::page_not_found(&request.title)));
        };

        let body = if format == "html" {
            self.client
                .get_parsed_page(&request.title)
                .await
                .map_err(wiki_error)?
        } else {
            page.content.clone()
        };

        let text = format!(
            "Title: {}\nURL: {}\nLast modified: {} by {}\nEdit comment: {}\nCategories: {}\nSize: {} bytes\n\n{}",
            page.title,
            self.client.page_url(&page.title),
            WikiClient::format_timestamp(&page.timestamp),
            page.user,
            render::comment_or_default(&page.comment),
            render::join_categories(&page.categories),
            page.size,
            body,
        );

        Ok(text_result(text))
    }

    /// Revision history
    #[tool(
        description = "Get a page's revision history, newest first, with editor, comment, and byte-size delta per revision."
    )]
    pub async fn get_page_history(
        &self,
        Parameters(request): Parameters<GetPageHistoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.unwrap_or(20).clamp(1, MAX_LIMIT);
        let revisions = self
            .client
            .get_page_history(&request.title, limit)
            .await
            .map_err(wiki_error)?;

        if revisions.is_empty() {
            return Ok(text_result(render::no_history(&request.title)));
        }

        let mut text = format!(
            "History of \"{}\" ({} revisions):\n",
            request.title,
            revisions.len()
        );
        for (index, revision) in revisions.iter().enumerate() {
            let minor = if revision.minor { " (minor)" } else { "" };
            // Delta is taken against the adjacent returned revision; if the
            // service skipped revisions it covers the window, not one edit.
            let delta = match revisions.get(index + 1) {
                Some(older) => render::history_delta(revision.size, older.size),
                None => String::new(),
            };
            let delta = if delta.is_empty() {
                String::new()
            } else {
                format!(" {delta}")
            };
            text.push_str(&format!(
                "\n{}. Revision {} - {} by {}{}{}\n   {}\n",
                index + 1,
                revision.rev_id,
                WikiClient::format_timestamp(&revision.timestamp),
                revision.user,
                minor,
                delta,
                render::comment_or_default(&revision.comment),
            ));
        }

        Ok(text_result(text))
    }

    /// Browse categories
    #[tool(
        description = "List wiki categories with member counts, optionally restricted to a name prefix."
    )]
    pub async fn list_categories(
        &self,
        Parameters(request): Parameters<ListCategoriesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.unwrap_or(20).clamp(1, MAX_LIMIT);
        let prefix = request.prefix.as_deref();
        let categories = self
            .client
            .list_categories(prefix, limit)
            .await
            .map_err(wiki_error)?;

        if categories.is_empty() {
            return Ok(text_result(render::no_categories(prefix)));
        }

        let mut text = match prefix {
            Some(prefix) => format!(
                "Found {} categories matching \"{}\":\n",
                categories.len(),
                prefix
            ),
            None => format!("Found {} categories:\n", categories.len()),
        };
        for category in &categories {
            text.push_str(&format!(
                "\n- {} ({} members: {} pages, {} files, {} subcategories)",
                category.name,
                category.members,
                category.pages,
                category.files,
                category.subcategories,
            ));
        }
        text.push('\n');

        Ok(text_result(text))
    }

    /// Category contents
    #[tool(
        description = "List the pages, files, or subcategories inside a category. The Category: prefix is optional."
    )]
    pub async fn get_category_members(
        &self,
        Parameters(request): Parameters<GetCategoryMembersRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.unwrap_or(50).clamp(1, MAX_LIMIT);
        let member_type = request.member_type.as_deref();
        if let Some(kind) = member_type {
            if !matches!(kind, "page" | "subcat" | "file") {
                return Err(McpError::invalid_params(
                    format!("unknown member type \"{kind}\" (expected page, subcat, or file)"),
                    None,
                ));
            }
        }

        let members = self
            .client
            .get_category_members(&request.category, limit, member_type)
            .await
            .map_err(wiki_error)?;

        let display = normalize_category_title(&request.category);
        if members.is_empty() {
            return Ok(text_result(render::no_category_members(&display)));
        }

        let mut text = match member_type {
            Some(kind) => format!("{} members in {} (type: {}):\n", members.len(), display, kind),
            None => format!("{} members in {}:\n", members.len(), display),
        };
        for member in &members {
            text.push_str(&format!(
                "\n- {} (id {}, {})",
                member.title,
                member.page_id,
                WikiClient::format_timestamp(&member.timestamp),
            ));
        }
        text.push('\n');

        Ok(text_result(text))
    }

    /// Activity feed
    #[tool(
        description = "List recent wiki changes with editor, timestamp, size delta, and comment. Filter by namespace or change kind (edit, new, log)."
    )]
    pub async fn get_recent_changes(
        &self,
        Parameters(request): Parameters<GetRecentChangesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.unwrap_or(20).clamp(1, MAX_LIMIT);
        let change_type = request.change_type.as_deref();
        if let Some(kind) = change_type {
            if !matches!(kind, "edit" | "new" | "log") {
                return Err(McpError::invalid_params(
                    format!("unknown change type \"{kind}\" (expected edit, new, or log)"),
                    None,
                ));
            }
        }

        let changes = self
            .client
            .get_recent_changes(limit, request.namespace, change_type)
            .await
            .map_err(wiki_error)?;

        if changes.is_empty() {
            return Ok(text_result(render::no_recent_changes()));
        }

        let mut text = format!("Recent changes ({}):\n", changes.len());
        for change in &changes {
            text.push_str(&format!(
                "\n- [{}] {} by {} at {} ({})\n  {}\n",
                change.kind.to_uppercase(),
                change.title,
                change.user,
                WikiClient::format_timestamp(&change.timestamp),
                render::change_delta(change.old_len, change.new_len),
                render::comment_or_default(&change.comment),
            ));
        }

        Ok(text_result(text))
    }

    /// Link graph
    #[tool(
        description = "List links from a page (direction 'from', default) or pages linking to it (direction 'to')."
    )]
    pub async fn get_page_links(
        &self,
        Parameters(request): Parameters<GetPageLinksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.unwrap_or(50).clamp(1, MAX_LIMIT);
        let direction = request.direction.as_deref().unwrap_or("from");

        let (titles, heading, empty_text) = match direction {
            "from" => (
                self.client
                    .get_page_links(&request.title, limit)
                    .await
                    .map_err(wiki_error)?,
                format!("Links from \"{}\"", request.title),
                render::no_links(&request.title),
            ),
            "to" => (
                self.client
                    .get_backlinks(&request.title, limit)
                    .await
                    .map_err(wiki_error)?,
                format!("Pages linking to \"{}\"", request.title),
                render::no_backlinks(&request.title),
            ),
            other => {
                return Err(McpError::invalid_params(
                    format!("unknown direction \"{other}\" (expected from or to)"),
                    None,
                ));
            }
        };

        if titles.is_empty() {
            return Ok(text_result(empty_text));
        }

        let mut text = format!("{} ({}):\n", heading, titles.len());
        for title in &titles {
            text.push_str(&format!("\n- {title}"));
        }
        text.push('\n');

        Ok(text_result(text))
    }
}
