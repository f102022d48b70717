//! Wire shapes of `formatversion=2` responses.
//!
//! The API omits most fields when the underlying page, revision set, or
//! category is empty or missing; every omission here collapses to a default
//! instead of a decode error.

use serde::Deserialize;

use crate::types::{
    Category, CategoryMember, PageContent, RecentChange, Revision, SearchResult,
};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub query: QueryBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryBody {
    #[serde(default)]
    pub search: Vec<SearchNode>,
    #[serde(default)]
    pub pages: Vec<PageNode>,
    #[serde(default)]
    pub allcategories: Vec<CategoryNode>,
    #[serde(default)]
    pub categorymembers: Vec<MemberNode>,
    #[serde(default)]
    pub recentchanges: Vec<ChangeNode>,
    #[serde(default)]
    pub backlinks: Vec<TitleNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ParseResponse {
    #[serde(default)]
    pub parse: ParseBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ParseBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchNode {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub wordcount: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub timestamp: String,
}

impl From<SearchNode> for SearchResult {
    fn from(node: SearchNode) -> Self {
        Self {
            title: node.title,
            page_id: node.pageid,
            snippet: node.snippet,
            word_count: node.wordcount,
            size: node.size,
            timestamp: node.timestamp,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageNode {
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub revisions: Vec<RevisionNode>,
    #[serde(default)]
    pub categories: Vec<TitleNode>,
    #[serde(default)]
    pub links: Vec<TitleNode>,
}

impl PageNode {
    /// Collapses the page node into [`PageContent`], taking text and edit
    /// metadata from the single most recent revision. A missing page yields
    /// `None`; that is the null-result path, not an error.
    pub fn into_content(self) -> Option<PageContent> {
        if self.missing {
            return None;
        }
        let revision = self.revisions.into_iter().next().unwrap_or_default();
        let content = revision
            .slots
            .map(|slots| slots.main.content)
            .unwrap_or_default();
        Some(PageContent {
            page_id: self.pageid,
            title: self.title,
            content,
            timestamp: revision.timestamp,
            user: revision.user,
            comment: revision.comment,
            categories: self.categories.into_iter().map(|c| c.title).collect(),
            size: revision.size,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RevisionNode {
    #[serde(default)]
    pub revid: u64,
    #[serde(default)]
    pub parentid: u64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub slots: Option<SlotsNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SlotsNode {
    #[serde(default)]
    pub main: SlotNode,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SlotNode {
    #[serde(default)]
    pub content: String,
}

impl From<RevisionNode> for Revision {
    fn from(node: RevisionNode) -> Self {
        Self {
            rev_id: node.revid,
            parent_id: node.parentid,
            timestamp: node.timestamp,
            user: node.user,
            comment: node.comment,
            size: node.size,
            minor: node.minor,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoryNode {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub files: u64,
    #[serde(default)]
    pub subcats: u64,
}

impl From<CategoryNode> for Category {
    fn from(node: CategoryNode) -> Self {
        Self {
            name: node.category,
            members: node.size,
            pages: node.pages,
            files: node.files,
            subcategories: node.subcats,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MemberNode {
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub timestamp: String,
}

impl From<MemberNode> for CategoryMember {
    fn from(node: MemberNode) -> Self {
        Self {
            page_id: node.pageid,
            title: node.title,
            timestamp: node.timestamp,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChangeNode {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub revid: u64,
    #[serde(default)]
    pub old_revid: u64,
    #[serde(default)]
    pub rcid: u64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub oldlen: u64,
    #[serde(default)]
    pub newlen: u64,
}

impl From<ChangeNode> for RecentChange {
    fn from(node: ChangeNode) -> Self {
        Self {
            kind: node.kind,
            title: node.title,
            page_id: node.pageid,
            rev_id: node.revid,
            old_rev_id: node.old_revid,
            rc_id: node.rcid,
            user: node.user,
            timestamp: node.timestamp,
            comment: node.comment,
            old_len: node.oldlen,
            new_len: node.newlen,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TitleNode {
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_page_collapses_to_none() {
        let body = json!({
            "query": { "pages": [ { "title": "Nope", "missing": true } ] }
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let page = response.query.pages.into_iter().next().unwrap();
        assert!(page.into_content().is_none());
    }

    #[test]
    fn page_without_categories_defaults_to_empty() {
        let body = json!({
            "query": { "pages": [ {
                "pageid": 7,
                "title": "Sandbox",
                "revisions": [ {
                    "revid": 42,
                    "parentid": 41,
                    "timestamp": "2024-01-15T03:45:00Z",
                    "user": "Alice",
                    "size": 120,
                    "slots": { "main": { "content": "Hello" } }
                } ]
            } ] }
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let page = response.query.pages.into_iter().next().unwrap();
        let content = page.into_content().unwrap();
        assert_eq!(content.content, "Hello");
        assert_eq!(content.comment, "");
        assert!(content.categories.is_empty());
        assert_eq!(content.size, 120);
    }

    #[test]
    fn revision_flags_default_to_false() {
        let body = json!({
            "query": { "pages": [ {
                "pageid": 7,
                "title": "Sandbox",
                "revisions": [
                    { "revid": 43, "parentid": 42, "size": 500, "minor": true },
                    { "revid": 42, "parentid": 41, "size": 420 }
                ]
            } ] }
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let revisions: Vec<Revision> = response
            .query
            .pages
            .into_iter()
            .next()
            .unwrap()
            .revisions
            .into_iter()
            .map(Revision::from)
            .collect();
        assert!(revisions[0].minor);
        assert!(!revisions[1].minor);
        assert_eq!(revisions[1].user, "");
    }

    #[test]
    fn log_change_carries_both_lengths() {
        let body = json!({
            "query": { "recentchanges": [ {
                "type": "log",
                "title": "Special:Log",
                "rcid": 9,
                "user": "Bob",
                "timestamp": "2024-02-01T10:00:00Z",
                "oldlen": 100,
                "newlen": 100
            } ] }
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let change: RecentChange = response
            .query
            .recentchanges
            .into_iter()
            .next()
            .unwrap()
            .into();
        assert_eq!(change.kind, "log");
        assert_eq!(change.old_len, change.new_len);
    }

    #[test]
    fn absent_result_sets_decode_to_defaults() {
        let response: QueryResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.query.search.is_empty());
        assert!(response.query.backlinks.is_empty());

        let parse: ParseResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parse.parse.text, "");
    }
}
